use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    /// Fewer bytes were available than the record being decoded requires.
    #[error("truncated input: {what} needs {needed} bytes at offset {offset}, got {available}")]
    TruncatedInput {
        what: &'static str,
        needed: usize,
        offset: usize,
        available: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("not a directory: {0}")]
    NotDirectory(String),

    #[error("is a directory: {0}")]
    IsDirectory(String),

    #[error("file name too long: {len} bytes")]
    NameTooLong { len: usize },

    #[error("file name is empty or contains a NUL byte")]
    InvalidName,

    #[error("block payload too large: {len} bytes")]
    PayloadTooLarge { len: usize },

    #[error("too many file entries: {count}")]
    TooManyFiles { count: usize },

    #[error("too many data blocks: {count}")]
    TooManyBlocks { count: usize },

    /// A used slot's chain points outside the data sector or never terminates.
    #[error("broken block chain in slot {slot} at block {block}")]
    BrokenChain { slot: usize, block: u16 },
}

pub type Result<T> = core::result::Result<T, FsError>;
