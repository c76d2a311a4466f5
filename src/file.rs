//! Buffered reads across a file's block chain.

use log::trace;

use crate::config::*;
use crate::container::Container;
use crate::{Error, Result};

/// Outcome of one read: bytes copied, and whether the chain's end was reached.
/// `eof` may accompany the final bytes of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadChunk {
    pub len: usize,
    pub eof: bool,
}

/// Read cursor over one chain. Holds only a borrowed view of the container.
#[derive(Debug, Clone)]
pub struct ChainReader<'a> {
    container: &'a Container,
    slot: usize,
    block: u16,
    offset: usize,
    eof: bool,
}

impl<'a> ChainReader<'a> {
    /// A cursor at the start of the chain whose head is `first_block`.
    /// A head of `NULL_BLOCK` is an empty file.
    pub fn new(container: &'a Container, slot: usize, first_block: u16) -> Self {
        Self {
            container,
            slot,
            block: first_block,
            offset: 0,
            eof: false,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Fills `buf` from the current position, moving to successor blocks as needed.
    /// Once the end has been reported every further call returns `{ len: 0, eof: true }`.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<ReadChunk> {
        let mut copied = 0;
        loop {
            if self.eof || self.block == NULL_BLOCK {
                self.eof = true;
                return Ok(ReadChunk { len: copied, eof: true });
            }
            let block = self.container.block(self.block).ok_or(Error::BrokenChain {
                slot: self.slot,
                block: self.block,
            })?;

            let n = (BLOCK_SIZE - self.offset).min(buf.len() - copied);
            buf[copied..copied + n].copy_from_slice(&block.payload[self.offset..self.offset + n]);
            self.offset += n;
            copied += n;

            if block.is_last() && self.offset == BLOCK_SIZE {
                self.eof = true;
                return Ok(ReadChunk { len: copied, eof: true });
            }
            if copied == buf.len() {
                return Ok(ReadChunk { len: copied, eof: false });
            }

            // Current block exhausted, request not yet satisfied.
            trace!("slot {}: block {} -> {}", self.slot, self.block, block.next_block);
            self.block = block.next_block;
            self.offset = 0;
        }
    }
}
