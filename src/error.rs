//! Error types for scanning.
//!
//! Call detection and argument resolution never fail; these errors come
//! from the collaborators around them (file access, tokenizer setup,
//! directory walking, configuration).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to initialize tokenizer: {reason}")]
    Tokenizer { reason: String },

    #[error("Parser produced no syntax tree for {path}")]
    Parse { path: PathBuf },

    #[error("Cannot walk {path}: {reason}")]
    Walk { path: PathBuf, reason: String },

    #[error("Failed to build thread pool: {reason}")]
    ThreadPool { reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl ScanError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
