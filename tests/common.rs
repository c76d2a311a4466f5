//! Common utilities for tests

use efes::{BLOCK_SIZE, Container, DataBlock, FileEntry};

pub const ORANGE: &str = "\x1b[38;5;214m";
pub const RESET: &str = "\x1b[0m";

/// Provides a macro for logging messages during tests.
/// e.g. log!("placeholder") -> println!("[test] placeholder");
#[macro_export]
macro_rules! log {
    ($msg:expr, $($arg:tt)*) => {
        println!(
            "{}[test] {}{}",
            crate::common::ORANGE,
            format!($msg, $($arg)*),
            crate::common::RESET
        )
    };
}

/// Deterministic printable ASCII, different for every seed.
pub fn ascii_bytes(n: usize, seed: u64) -> Vec<u8> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            b' ' + ((state >> 33) % 95) as u8
        })
        .collect()
}

/// Places `content` block by block at the given indices, linking them in order.
/// `blocks` must already be long enough.
pub fn write_chain(blocks: &mut [DataBlock], indices: &[u16], content: &[u8]) {
    for (i, &index) in indices.iter().enumerate() {
        let next = indices.get(i + 1).copied().unwrap_or(0);
        let start = (i * BLOCK_SIZE).min(content.len());
        let end = ((i + 1) * BLOCK_SIZE).min(content.len());
        blocks[index as usize] = DataBlock::new(next, &content[start..end]).unwrap();
    }
}

/// Single file `hi.txt` whose content spans blocks 1, 3, 4 and 6, with
/// unrelated blocks 2 and 5 interleaved.
pub fn scattered_file(content: &[u8]) -> Container {
    let mut blocks: Vec<DataBlock> = (0..7).map(|_| DataBlock::empty(0)).collect();
    write_chain(&mut blocks, &[1, 3, 4, 6], content);
    Container::from_parts(vec![FileEntry::new("hi.txt", 1).unwrap()], blocks).unwrap()
}
