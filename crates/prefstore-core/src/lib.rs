//! prefstore: a self-persisting hierarchical preference store.
//!
//! A [`Settings`] is a nested preference document that behaves like an
//! ordinary mutable mapping while silently keeping a serialized copy of
//! itself in sync on disk: every mutating call writes the full document
//! back (while auto-save is on, or when the per-call `save_now` override
//! asks for it), and dropping a bound store flushes one final time.
//!
//! ```no_run
//! use prefstore_core::{Map, Settings};
//!
//! let mut settings = Settings::open("com.example.myapp")?;
//! settings.set_key("theme", "dark", false);
//! settings.set_key("window", Map::new().with("width", 800), false);
//!
//! assert_eq!(settings.get("theme").and_then(|v| v.as_text()), Some("dark"));
//! assert_eq!(
//!     settings.get_path("window.width").and_then(|v| v.as_int()),
//!     Some(800)
//! );
//! # Ok::<(), prefstore_core::SettingsError>(())
//! ```
//!
//! The on-disk format and the storage location are injected seams (see
//! [`Codec`] and [`StorageHandle`]), with JSON in the per-user preference
//! directory as the defaults.

pub mod error;
pub mod settings;

pub use error::{Result, SettingsError};
pub use settings::{Settings, SettingsBuilder};

// The document model and the I/O seams, re-exported so most callers only
// need this crate.
pub use prefstore_model::{Map, Value};
pub use prefstore_persistence::{Codec, FileHandle, JsonCodec, PersistenceError, StorageHandle};
