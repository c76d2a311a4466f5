//! Little-endian byte layout of the three on-disk records.
//!
//! - FileEntry: `name[NAME_LIMIT] | first_block: u16`
//! - Sector header: `total_block_count: u16`
//! - DataBlock: `next_block: u16 | payload[BLOCK_SIZE]`

use crate::config::*;
use crate::structs::{DataBlock, FileEntry};
use crate::{Error, Result};

/// Sequential reader over a byte slice. Every read is all-or-nothing.
pub struct Decoder<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn take(&mut self, what: &'static str, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::TruncatedInput {
                what,
                needed: len,
                offset: self.offset,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    pub fn read_u16(&mut self, what: &'static str) -> Result<u16> {
        let bytes = self.take(what, 2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_entry(&mut self) -> Result<FileEntry> {
        let bytes = self.take("file entry", FILE_ENTRY_SIZE)?;
        Ok(decode_entry(bytes))
    }

    pub fn read_block(&mut self) -> Result<DataBlock> {
        let bytes = self.take("data block", DATA_BLOCK_SIZE)?;
        Ok(decode_block(bytes))
    }
}

// Callers guarantee `bytes.len() == FILE_ENTRY_SIZE`.
fn decode_entry(bytes: &[u8]) -> FileEntry {
    let mut name = [0; NAME_LIMIT];
    name.copy_from_slice(&bytes[..NAME_LIMIT]);
    FileEntry {
        name,
        first_block: u16::from_le_bytes([bytes[NAME_LIMIT], bytes[NAME_LIMIT + 1]]),
    }
}

// Callers guarantee `bytes.len() == DATA_BLOCK_SIZE`.
fn decode_block(bytes: &[u8]) -> DataBlock {
    let mut block = DataBlock::empty(u16::from_le_bytes([bytes[0], bytes[1]]));
    block.payload.copy_from_slice(&bytes[2..]);
    block
}

pub fn encode_entry(entry: &FileEntry, out: &mut Vec<u8>) {
    out.extend_from_slice(&entry.name);
    out.extend_from_slice(&entry.first_block.to_le_bytes());
}

pub fn encode_block(block: &DataBlock, out: &mut Vec<u8>) {
    out.extend_from_slice(&block.next_block.to_le_bytes());
    out.extend_from_slice(block.payload.as_slice());
}

pub fn encode_block_count(count: u16, out: &mut Vec<u8>) {
    out.extend_from_slice(&count.to_le_bytes());
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_entry_layout() {
        let entry = FileEntry::new("hi.txt", 0x0102).unwrap();
        let mut out = Vec::new();
        encode_entry(&entry, &mut out);
        assert_eq!(out.len(), FILE_ENTRY_SIZE);
        assert_eq!(&out[..6], b"hi.txt");
        assert!(out[6..NAME_LIMIT].iter().all(|&c| c == 0));
        assert_eq!(&out[NAME_LIMIT..], &[0x02, 0x01]);

        let decoded = Decoder::new(&out).read_entry().unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn test_block_layout() {
        let block = DataBlock::new(7, b"payload").unwrap();
        let mut out = Vec::new();
        encode_block(&block, &mut out);
        assert_eq!(out.len(), DATA_BLOCK_SIZE);
        assert_eq!(&out[..2], &[7, 0]);
        assert_eq!(&out[2..9], b"payload");

        let decoded = Decoder::new(&out).read_block().unwrap();
        assert_eq!(decoded, block);
    }

    #[test]
    fn test_name_without_terminator() {
        let raw = [b'a'; FILE_ENTRY_SIZE];
        let entry = Decoder::new(&raw).read_entry().unwrap();
        assert_eq!(entry.name_bytes().len(), NAME_LIMIT);
        assert!(entry.name_bytes().iter().all(|&c| c == b'a'));
    }

    #[test]
    fn test_name_stops_at_first_nul() {
        let mut raw = [0u8; FILE_ENTRY_SIZE];
        raw[..3].copy_from_slice(b"abc");
        raw[4..7].copy_from_slice(b"xyz"); // garbage after the terminator
        let entry = Decoder::new(&raw).read_entry().unwrap();
        assert_eq!(entry.name_bytes(), b"abc");
    }

    #[test]
    fn test_truncated() {
        let raw = [0u8; FILE_ENTRY_SIZE - 1];
        let mut decoder = Decoder::new(&raw);
        match decoder.read_entry() {
            Err(Error::TruncatedInput { needed, available, .. }) => {
                assert_eq!(needed, FILE_ENTRY_SIZE);
                assert_eq!(available, FILE_ENTRY_SIZE - 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        // Nothing consumed on failure.
        assert_eq!(decoder.offset(), 0);

        let mut decoder = Decoder::new(&[1]);
        assert!(matches!(
            decoder.read_u16("block count"),
            Err(Error::TruncatedInput { what: "block count", .. })
        ));
    }
}
