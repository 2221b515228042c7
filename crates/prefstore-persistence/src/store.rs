//! Storage handles for preference documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::atomic::atomic_write;
use crate::error::{PersistenceError, Result};

/// A byte-addressable location a preference document persists to.
///
/// The store core only needs existence checks, whole-content reads, and
/// truncating writes; anything satisfying that can back a store.
pub trait StorageHandle: Send + Sync {
    /// Human-readable description of the location, for diagnostics.
    fn location(&self) -> String;

    /// Returns true if the backing store currently holds content.
    fn exists(&self) -> bool;

    /// Reads the full backing store contents.
    fn read(&self) -> Result<Vec<u8>>;

    /// Replaces the backing store contents.
    fn write(&self, bytes: &[u8]) -> Result<()>;
}

impl<T: StorageHandle + ?Sized> StorageHandle for Arc<T> {
    fn location(&self) -> String {
        (**self).location()
    }

    fn exists(&self) -> bool {
        (**self).exists()
    }

    fn read(&self) -> Result<Vec<u8>> {
        (**self).read()
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }
}

/// File-backed storage handle. Writes go through a temp file and rename so
/// a crash mid-save never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct FileHandle {
    path: PathBuf,
}

impl FileHandle {
    /// Creates a handle for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageHandle for FileHandle {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read(&self) -> Result<Vec<u8>> {
        if !self.path.exists() {
            return Err(PersistenceError::NotFound(self.location()));
        }
        fs::read(&self.path).map_err(|source| PersistenceError::Read {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        atomic_write(&self.path, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let handle = FileHandle::new(dir.path().join("missing.json"));

        assert!(!handle.exists());
        assert!(matches!(
            handle.read(),
            Err(PersistenceError::NotFound(_))
        ));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempdir().unwrap();
        let handle = FileHandle::new(dir.path().join("prefs.json"));

        handle.write(b"{\"a\": 1}").unwrap();

        assert!(handle.exists());
        assert_eq!(handle.read().unwrap(), b"{\"a\": 1}");
    }

    #[test]
    fn test_location_is_the_path() {
        let handle = FileHandle::new("/tmp/example.json");
        assert_eq!(handle.location(), "/tmp/example.json");
    }

    #[test]
    fn test_shared_handle_delegates() {
        let dir = tempdir().unwrap();
        let handle = Arc::new(FileHandle::new(dir.path().join("prefs.json")));

        handle.write(b"shared").unwrap();

        assert_eq!(StorageHandle::read(&handle).unwrap(), b"shared");
    }
}
