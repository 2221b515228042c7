//! Error types for preference persistence.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while persisting or restoring a preference
/// document.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// A parent directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing store could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing store could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No backing store exists at the resolved location.
    #[error("no preferences found at {0}")]
    NotFound(String),

    /// The document could not be encoded by the codec.
    #[error("failed to encode document: {0}")]
    Encode(String),

    /// The stored bytes could not be decoded by the codec.
    #[error("failed to decode document: {0}")]
    Decode(String),
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
