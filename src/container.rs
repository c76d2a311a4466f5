//! The container file: the fixed file table followed by the data sector.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use log::{info, warn};

use crate::codec::{self, Decoder};
use crate::config::*;
use crate::structs::{DataBlock, FileEntry};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    files: Box<[FileEntry; MAX_FILES]>,
    blocks: Vec<DataBlock>, // index == block id, len == total_block_count
}

impl Container {
    /// An empty table and an empty data sector.
    pub fn new() -> Self {
        Self {
            files: Box::new([FileEntry::UNUSED; MAX_FILES]),
            blocks: Vec::new(),
        }
    }

    /// Assembles a container from table slots (in slot order) and the data sector.
    /// Slots past `entries.len()` stay unused.
    pub fn from_parts(entries: Vec<FileEntry>, blocks: Vec<DataBlock>) -> Result<Self> {
        if entries.len() > MAX_FILES {
            return Err(Error::TooManyFiles {
                count: entries.len(),
            });
        }
        if blocks.len() > u16::MAX as usize {
            return Err(Error::TooManyBlocks {
                count: blocks.len(),
            });
        }
        let mut container = Self::new();
        container.files[..entries.len()].copy_from_slice(&entries);
        container.blocks = blocks;
        Ok(container)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read(path)?;
        let container = Self::decode(&raw)?;
        container.validate()?;
        for (slot, entry) in container.used_entries() {
            if core::str::from_utf8(entry.name_bytes()).is_err() {
                warn!("slot {}: name is not valid UTF-8, it will not be listed", slot);
            }
        }
        info!(
            "loaded container {}: {} files, {} blocks",
            path.display(),
            container.used_entries().count(),
            container.total_block_count()
        );
        Ok(container)
    }

    /// Decodes the table, the block count and exactly that many blocks.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let mut decoder = Decoder::new(raw);
        let mut files = Box::new([FileEntry::UNUSED; MAX_FILES]);
        for slot in files.iter_mut() {
            *slot = decoder.read_entry()?;
        }
        let total = decoder.read_u16("block count")?;
        let mut blocks = Vec::with_capacity(total as usize);
        for _ in 0..total {
            blocks.push(decoder.read_block()?);
        }
        if decoder.remaining() > 0 {
            warn!("ignoring {} trailing bytes after the data sector", decoder.remaining());
        }
        Ok(Self { files, blocks })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size_in_bytes());
        for entry in self.files.iter() {
            codec::encode_entry(entry, &mut out);
        }
        codec::encode_block_count(self.total_block_count(), &mut out);
        for block in &self.blocks {
            codec::encode_block(block, &mut out);
        }
        out
    }

    /// Writes the container to `path`, replacing any previous content.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let raw = self.encode();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(raw.len() as u64)?;
        file.write_all(&raw)?;
        file.flush()?;
        info!(
            "saved container {}: {} bytes, {} blocks",
            path.display(),
            raw.len(),
            self.total_block_count()
        );
        Ok(())
    }

    pub fn size_in_bytes(&self) -> usize {
        TABLE_SIZE + BLOCK_COUNT_SIZE + self.blocks.len() * DATA_BLOCK_SIZE
    }

    pub fn total_block_count(&self) -> u16 {
        // from_parts and decode both keep the sector within u16 range
        self.blocks.len() as u16
    }

    pub fn entries(&self) -> &[FileEntry; MAX_FILES] {
        &self.files
    }

    pub fn entry(&self, slot: usize) -> Option<&FileEntry> {
        self.files.get(slot)
    }

    pub fn used_entries(&self) -> impl Iterator<Item = (usize, &FileEntry)> {
        self.files.iter().enumerate().filter(|(_, e)| e.is_used())
    }

    /// First used slot whose stored name equals `name`.
    pub fn find(&self, name: &str) -> Option<(usize, &FileEntry)> {
        self.used_entries().find(|(_, e)| e.name_eq(name))
    }

    pub fn blocks(&self) -> &[DataBlock] {
        &self.blocks
    }

    pub fn block(&self, id: u16) -> Option<&DataBlock> {
        self.blocks.get(id as usize)
    }

    /// Number of blocks in the chain starting at `first_block`.
    /// A chain that leaves the sector or loops is reported against `slot`.
    pub fn chain_len(&self, slot: usize, first_block: u16) -> Result<usize> {
        if first_block == NULL_BLOCK {
            return Ok(0);
        }
        let mut len = 0;
        let mut current = first_block;
        loop {
            let block = self.block(current).ok_or(Error::BrokenChain {
                slot,
                block: current,
            })?;
            len += 1;
            if len > self.blocks.len() {
                return Err(Error::BrokenChain {
                    slot,
                    block: current,
                });
            }
            if block.is_last() {
                return Ok(len);
            }
            current = block.next_block;
        }
    }

    /// Checks that every used slot's chain stays inside the sector and terminates.
    pub fn validate(&self) -> Result<()> {
        for (slot, entry) in self.used_entries() {
            self.chain_len(slot, entry.first_block)?;
        }
        Ok(())
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}
