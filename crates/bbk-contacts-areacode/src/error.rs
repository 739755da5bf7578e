use std::path::PathBuf;
use thiserror::Error;

pub type AreaCodeResult<T> = Result<T, AreaCodeError>;

/// Errors raised while opening or reading an area-code database
#[derive(Error, Debug)]
pub enum AreaCodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Area-code database not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Area-code database truncated: {len} bytes")]
    Truncated { len: usize },

    #[error("Invalid index offset {offset} in a {len} byte database")]
    InvalidIndexOffset { offset: i64, len: usize },

    #[error("Corrupt record at offset {offset}")]
    CorruptRecord { offset: usize },

    #[error("Area-code lookup unavailable: {0}")]
    Unavailable(String),
}
