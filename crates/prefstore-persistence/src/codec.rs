//! Document codecs.
//!
//! A codec turns an in-memory document into bytes and back; the store core
//! never sees the format. Any structured format able to express nested
//! maps, lists, and the scalar types of the document model can be
//! substituted through [`Codec`].

use prefstore_model::Map;

use crate::error::{PersistenceError, Result};

/// Encodes and decodes preference documents.
pub trait Codec: Send + Sync {
    /// The file extension (without the dot) conventionally used by this
    /// format, e.g. `"json"`.
    fn extension(&self) -> &str;

    /// Serializes the full document.
    fn encode(&self, document: &Map) -> Result<Vec<u8>>;

    /// Deserializes bytes produced by [`Codec::encode`] back into a
    /// document.
    fn decode(&self, bytes: &[u8]) -> Result<Map>;
}

/// The default on-disk format: pretty-printed JSON with keys in sorted
/// order.
///
/// Sortedness is a property of the document model itself (maps iterate in
/// key order), so encoding the same document always produces the same
/// bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn extension(&self) -> &str {
        "json"
    }

    fn encode(&self, document: &Map) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(document)
            .map_err(|err| PersistenceError::Encode(err.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Map> {
        serde_json::from_slice(bytes).map_err(|err| PersistenceError::Decode(err.to_string()))
    }
}
