//! Persistence boundary for prefstore.
//!
//! Everything that touches bytes lives here, behind two seams the store
//! core is injected with:
//!
//! - **[`Codec`]**: encodes a document to bytes and back. [`JsonCodec`] is
//!   the default format (pretty-printed, deterministic key order).
//! - **[`StorageHandle`]**: a byte-addressable location with existence
//!   checks, whole-content reads, and truncating writes. [`FileHandle`] is
//!   the default, writing atomically via a temp file and rename.
//!
//! [`paths`] resolves logical preference names to files in the per-user
//! preference directory.

pub mod atomic;
pub mod codec;
pub mod error;
pub mod paths;
pub mod store;

pub use codec::{Codec, JsonCodec};
pub use error::{PersistenceError, Result};
pub use store::{FileHandle, StorageHandle};
