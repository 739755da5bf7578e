use std::path::PathBuf;
use thiserror::Error;

pub type CsvResult<T> = Result<T, CsvError>;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Could not decode {} with any of: {tried}", path.display())]
    UndecodableInput { path: PathBuf, tried: String },

    #[error("Missing header row in {}", .0.display())]
    MissingHeaderRow(PathBuf),

    #[error("Output file is busy, close it in other programs and retry: {}", path.display())]
    WriteLocked {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
