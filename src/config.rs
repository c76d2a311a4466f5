use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const MAX_FILES: usize = 200; // Slots in the file table
pub const NAME_LIMIT: usize = 128; // Bytes reserved for a file name
pub const BLOCK_SIZE: usize = 4 * 1024; // Payload bytes per data block

pub const FILE_ENTRY_SIZE: usize = NAME_LIMIT + 2; // name + first block index
pub const DATA_BLOCK_SIZE: usize = 2 + BLOCK_SIZE; // next block index + payload
pub const BLOCK_COUNT_SIZE: usize = 2; // total_block_count header of the data sector
pub const TABLE_SIZE: usize = MAX_FILES * FILE_ENTRY_SIZE;

/// Block index 0 is reserved: "no successor" in a chain, "unused" in a slot.
pub const NULL_BLOCK: u16 = 0;

pub const ROOT: &str = ".";
pub const DEFAULT_CONTAINER_PATH: &str = "virtual.img";

/// The format stores no timestamps, every entity reports this one.
pub const MOD_TIME_SECS: u64 = 1_754_231_400; // 2025-08-03T14:30:00Z

pub fn mod_time() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(MOD_TIME_SECS)
}
