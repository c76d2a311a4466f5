//! Efes is a minimal embedded, read-only virtual file system.
//! A single container file holds a fixed table of file names and a sector of
//! singly-linked data blocks; directories are derived from `/` in the names.
//! No permissions, timestamps or write path.
//!
//! Efes container's linear layout (little-endian):
//! - File table: MAX_FILES entries of { name[128], first_block: u16 }
//! - Block count: u16
//! - Data sector: block count entries of { next_block: u16, payload[4096] }
//!
//! Efes's layers (from bottom to top):
//! 1. Codec: Byte layout of entries, blocks and the sector header.
//! 2. Container: The file table and the data sector, load and save.
//! 3. File: Read cursor walking one file's block chain.
//! 4. Directory/Path: Directories synthesized from file name prefixes.
//! 5. FileSystem: open / stat / read / read_dir for servers and the shell.

mod config;
mod structs;
mod codec;
mod container;
mod file;
mod path;
mod directory;
mod fs;
mod shell;
mod error;

pub use config::*;
pub use structs::*;
pub use codec::{Decoder, encode_block, encode_block_count, encode_entry};
pub use container::Container;
pub use file::{ChainReader, ReadChunk};
pub use path::{base_name, dir_prefix, normalize};
pub use directory::{DirBatch, Directory, Node, file_size, synthesize};
pub use fs::{File, FileSystem, Handle};
pub use shell::Shell;
pub use error::FsError as Error;
pub use error::Result;
