//! Preference file locations.
//!
//! Logical preference names (e.g. `com.example.myapp`) resolve to files in
//! the per-user preference directory. The directory can be overridden with
//! the `PREFSTORE_DIR` environment variable, which is also the hook tests
//! and sandboxed environments use.

use std::path::PathBuf;

/// Environment variable overriding the preference directory.
pub const PREFS_DIR_ENV: &str = "PREFSTORE_DIR";

/// Directory name used when no home directory can be determined.
const FALLBACK_DIR: &str = ".prefstore";

/// Returns the directory preference files live in.
///
/// Resolution order:
/// 1. `PREFSTORE_DIR` environment variable if set
/// 2. the platform per-user preference directory (`~/Library/Preferences`
///    on macOS, the XDG config directory on Linux)
/// 3. `.prefstore` in the current directory as a fallback
pub fn preferences_dir() -> PathBuf {
    std::env::var(PREFS_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs::preference_dir().unwrap_or_else(|| PathBuf::from(FALLBACK_DIR)))
}

/// Returns the backing file path for a logical preference name, with the
/// extension supplied by the codec in use.
pub fn preference_file(name: &str, extension: &str) -> PathBuf {
    preferences_dir().join(format!("{name}.{extension}"))
}
