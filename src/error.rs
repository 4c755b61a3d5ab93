use std::path::PathBuf;
use thiserror::Error;

/// Why a single file could not be turned into a block. Never fatal to a run.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not valid UTF-8: {}", .0.display())]
    DecodeFailure(PathBuf),

    #[error("file too large: {size} bytes > {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    #[error("{0}")]
    Other(String),
}

impl LoadError {
    pub(crate) fn from_io(path: PathBuf, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound(path),
            _ => LoadError::Other(err.to_string()),
        }
    }
}

/// Failures that end a run before anything is delivered.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("No text files found or processed.")]
    EmptyResult,

    #[error("invalid exclude glob: {0}")]
    InvalidGlob(#[from] globset::Error),
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl From<arboard::Error> for SinkError {
    fn from(err: arboard::Error) -> Self {
        SinkError::Clipboard(err.to_string())
    }
}
