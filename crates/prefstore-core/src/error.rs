//! Error types for the preference store.

use prefstore_persistence::PersistenceError;
use thiserror::Error;

/// Errors that can occur while opening or reloading a preference store.
///
/// The mutation API never returns these: save-path failures degrade to a
/// warning in the diagnostic stream. Only construction and explicit
/// reloads surface errors, and only for unreadable or malformed content;
/// a missing backing file just means "start empty".
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Persistence error.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
