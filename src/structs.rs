use core::fmt;
use std::time::SystemTime;

use crate::config::*;
use crate::{Error, Result};

/// One slot of the file table.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FileEntry {
    pub name: [u8; NAME_LIMIT], // NUL-terminated unless the name fills the buffer
    pub first_block: u16,       // NULL_BLOCK marks the slot unused
}

impl FileEntry {
    pub const UNUSED: Self = Self {
        name: [0; NAME_LIMIT],
        first_block: NULL_BLOCK,
    };

    pub fn new(name: &str, first_block: u16) -> Result<Self> {
        let bytes = name.as_bytes();
        if bytes.is_empty() || bytes.contains(&0) {
            return Err(Error::InvalidName);
        }
        if bytes.len() > NAME_LIMIT {
            return Err(Error::NameTooLong { len: bytes.len() });
        }
        let mut buf = [0; NAME_LIMIT];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            name: buf,
            first_block,
        })
    }

    pub fn is_used(&self) -> bool {
        self.first_block != NULL_BLOCK
    }

    /// Logical name: the bytes before the first NUL, or the whole buffer.
    pub fn name_bytes(&self) -> &[u8] {
        let end = self
            .name
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(NAME_LIMIT);
        &self.name[..end]
    }

    pub fn name_str(&self) -> String {
        String::from_utf8_lossy(self.name_bytes()).into_owned()
    }

    pub fn name_eq(&self, name: &str) -> bool {
        self.name_bytes() == name.as_bytes()
    }
}

impl fmt::Debug for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileEntry")
            .field("name", &self.name_str())
            .field("first_block", &self.first_block)
            .finish()
    }
}

/// A fixed-size link in a file's block chain.
#[derive(Clone, PartialEq, Eq)]
pub struct DataBlock {
    pub next_block: u16, // NULL_BLOCK ends the chain
    pub payload: Box<[u8; BLOCK_SIZE]>,
}

impl DataBlock {
    pub fn empty(next_block: u16) -> Self {
        Self {
            next_block,
            payload: Box::new([0; BLOCK_SIZE]),
        }
    }

    /// Copies `data` into a zero-padded payload.
    pub fn new(next_block: u16, data: &[u8]) -> Result<Self> {
        if data.len() > BLOCK_SIZE {
            return Err(Error::PayloadTooLarge { len: data.len() });
        }
        let mut block = Self::empty(next_block);
        block.payload[..data.len()].copy_from_slice(data);
        Ok(block)
    }

    pub fn is_last(&self) -> bool {
        self.next_block == NULL_BLOCK
    }
}

impl fmt::Debug for DataBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let used = self.payload.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1);
        f.debug_struct("DataBlock")
            .field("next_block", &self.next_block)
            .field("payload_used", &used)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Regular,
    Directory,
}

/// What `stat` reports for files and synthesized directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    pub size: u64,
    pub modified: SystemTime,
    pub ftype: FileType,
}

impl Metadata {
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            modified: mod_time(),
            ftype: FileType::Regular,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            modified: mod_time(),
            ftype: FileType::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.ftype == FileType::Directory
    }
}
