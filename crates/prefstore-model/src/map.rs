//! The nested mapping type used at every level of a preference document.

use std::collections::{btree_map, BTreeMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A string-keyed mapping inside a preference document.
///
/// `Map` is used for the root of a document and for every nested mapping
/// below it, so the whole tree is one homogeneous type. It has no save
/// path of its own; persistence belongs to the store that owns the root.
///
/// Keys are held in sorted order. That ordering is part of the persistence
/// contract: encoding the same document always produces the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Map {
    entries: BTreeMap<String, Value>,
}

impl Map {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Looks up a single key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Mutable single-key lookup.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Inserts `value` under `key`, returning the value it displaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Inserts an entry and returns the map, for literal-style
    /// construction:
    ///
    /// ```
    /// # use prefstore_model::Map;
    /// let doc = Map::new()
    ///     .with("theme", "dark")
    ///     .with("window", Map::new().with("width", 800));
    /// assert_eq!(doc.len(), 2);
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Removes and returns the last entry in key order. `None` when empty.
    pub fn pop_last(&mut self) -> Option<(String, Value)> {
        self.entries.pop_last()
    }

    /// Returns the value under `key`, inserting `default` first if the key
    /// is absent.
    pub fn get_or_insert(&mut self, key: impl Into<String>, default: impl Into<Value>) -> &mut Value {
        self.entries.entry(key.into()).or_insert_with(|| default.into())
    }

    /// Merges `pairs` into the map, overwriting existing keys.
    pub fn merge<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.entries.extend(pairs);
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Iterates over keys in order.
    pub fn keys(&self) -> btree_map::Keys<'_, String, Value> {
        self.entries.keys()
    }

    /// Iterates over values in key order.
    pub fn values(&self) -> btree_map::Values<'_, String, Value> {
        self.entries.values()
    }

    /// Walks a dotted path through the document, stepping into nested maps
    /// by key and into lists by numeric index.
    ///
    /// Any missing key, out-of-range index, or attempt to step into a
    /// scalar yields `None`, never an error. A single-segment path is a
    /// plain single-key lookup. The empty path matches nothing.
    ///
    /// ```
    /// # use prefstore_model::{Map, Value};
    /// let doc = Map::new().with("window", Map::new().with("width", 800));
    /// assert_eq!(doc.get_path("window.width"), Some(&Value::Int(800)));
    /// assert_eq!(doc.get_path("window.height"), None);
    /// assert_eq!(doc.get_path("window.width.deeper"), None);
    /// ```
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return None;
        }
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = current.at(segment)?;
        }
        Some(current)
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}

impl From<BTreeMap<String, Value>> for Map {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, Value)> for Map {
    fn extend<I: IntoIterator<Item = (String, Value)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
