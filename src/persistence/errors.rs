//! # Persistence Errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for gateway operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Failures at the durable storage boundary
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Disk read or write failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Backing file exists but does not hold a valid record set
    #[error("Corrupt data in {path}: {reason}")]
    CorruptData { path: PathBuf, reason: String },

    /// The same id appears twice in a loaded set
    #[error("Duplicate record id {0}")]
    DuplicateId(u64),

    /// Record set could not be encoded
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Write refused by the backend
    #[error("Write rejected: {0}")]
    WriteRejected(String),
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
