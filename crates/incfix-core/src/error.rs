//! Error types for incfix

use std::path::PathBuf;
use thiserror::Error;

/// incfix error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error on {path}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found in index: {0}")]
    FileNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap an I/O error together with the path it happened on
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for incfix
pub type Result<T> = std::result::Result<T, Error>;
