//! The self-persisting preference mapping.
//!
//! A [`Settings`] behaves like an ordinary nested mapping while silently
//! keeping a serialized copy of itself in sync on disk. Every mutating
//! call runs an auto-save hook gated by the per-instance flag OR'd with a
//! per-call `save_now` override; reads never touch the backing store.

use std::fmt;
use std::sync::Arc;

use prefstore_model::{Map, Value};
use prefstore_persistence::{paths, Codec, FileHandle, JsonCodec, StorageHandle};
use tracing::{info, warn};

use crate::error::Result;

/// Ties a store to its logical name and injected I/O collaborators.
#[derive(Clone)]
struct Binding {
    name: String,
    handle: Arc<dyn StorageHandle>,
    codec: Arc<dyn Codec>,
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("location", &self.handle.location())
            .finish()
    }
}

/// A preference document that keeps a serialized copy of itself on disk.
///
/// A bound store ([`Settings::open`]) loads existing content on
/// construction, writes the full document back after every mutating call
/// while auto-save is on, and flushes one final time when dropped: the
/// owning scope acts as the guard, so the flush runs on every exit path.
/// A detached store ([`Settings::detached`]) is the same mapping with no
/// backing location and never performs I/O.
///
/// Nested maps in the document are plain [`Map`] values. Mutating one in
/// place, through [`Settings::document_mut`] or [`Settings::get_mut`],
/// is not observed by the save path; persistence is triggered only by
/// operations on the store handle itself, or an explicit
/// [`Settings::save`].
///
/// Save failures never surface to the caller: the mutation stays applied
/// in memory and a warning goes to the diagnostic stream.
#[derive(Debug)]
pub struct Settings {
    binding: Option<Binding>,
    auto_save: bool,
    verbose: bool,
    root: Map,
}

impl Settings {
    /// Opens the store bound to `name`, loading the backing file if one
    /// exists and starting empty otherwise.
    ///
    /// Equivalent to `Settings::named(name).open()`. Fails only if the
    /// backing file exists but cannot be read or decoded.
    pub fn open(name: &str) -> Result<Self> {
        Self::named(name).open()
    }

    /// Starts building a bound store with non-default options.
    pub fn named(name: &str) -> SettingsBuilder {
        SettingsBuilder::new(name)
    }

    /// Creates a store with no backing location.
    ///
    /// A detached store never performs I/O; auto-save is forced off and
    /// [`Settings::save`] is a no-op. Useful for tests and for building a
    /// document before handing it to a bound store.
    pub fn detached(data: Map) -> Self {
        Self {
            binding: None,
            auto_save: false,
            verbose: false,
            root: data,
        }
    }

    /// The logical name, for a bound store.
    pub fn name(&self) -> Option<&str> {
        self.binding.as_ref().map(|b| b.name.as_str())
    }

    /// Returns true if the store is bound to a backing location.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Current auto-save setting.
    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    /// Turns auto-save on or off, returning the effective value.
    ///
    /// Forced off on a detached store, which has nowhere to save to.
    pub fn set_auto_save(&mut self, auto_save: bool) -> bool {
        if self.binding.is_none() && auto_save {
            warn!("auto-save has no effect on a detached store");
            self.auto_save = false;
        } else {
            self.auto_save = auto_save;
        }
        self.auto_save
    }

    /// Reloads the document from the backing store, replacing the current
    /// contents.
    ///
    /// A missing backing file is not an error: a warning is logged and the
    /// document is left as it is. Unreadable or malformed content surfaces
    /// as an error. Does nothing on a detached store.
    pub fn load(&mut self) -> Result<()> {
        let Some(binding) = self.binding.clone() else {
            return Ok(());
        };
        if !binding.handle.exists() {
            warn!(
                name = %binding.name,
                location = %binding.handle.location(),
                "no preferences to load"
            );
            return Ok(());
        }
        if self.verbose {
            info!(
                name = %binding.name,
                location = %binding.handle.location(),
                "loading preferences"
            );
        }
        let bytes = binding.handle.read()?;
        let document = binding.codec.decode(&bytes)?;
        self.replace(document, false);
        Ok(())
    }

    /// Writes the current document to the backing store, unconditionally;
    /// the auto-save flag is not consulted.
    ///
    /// Returns immediately on a detached store. Failures are logged as
    /// warnings and swallowed; a caller that needs to distinguish "saved"
    /// from "save failed" must observe the diagnostic stream.
    pub fn save(&self) {
        self.persist();
    }

    /// Replaces the entire document with `data`. Pass `Map::new()` to
    /// reset to empty.
    pub fn replace(&mut self, data: Map, save_now: bool) {
        self.root = data;
        self.autosave(save_now);
    }

    /// Sets a single top-level key, running the auto-save hook with the
    /// per-call override.
    pub fn set_key(&mut self, key: impl Into<String>, value: impl Into<Value>, save_now: bool) {
        self.root.insert(key, value);
        self.autosave(save_now);
    }

    /// Replaces the *entire* document with exactly the supplied pairs.
    ///
    /// This is a full replace, not a merge: it matches
    /// [`Settings::replace`] rather than what the name might suggest. Use
    /// [`Settings::merge`] to update keys in place.
    pub fn set_keys<K, V, I>(&mut self, pairs: I, save_now: bool)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.root = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.autosave(save_now);
    }

    /// Stores `value` under `key`, returning the value it displaced.
    ///
    /// This is the item-assignment path: the auto-save hook runs with no
    /// per-call override, so the write happens iff auto-save is on.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let previous = self.root.insert(key, value);
        self.autosave(false);
        previous
    }

    /// Looks up a top-level key. Never touches the backing store.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Mutable top-level lookup.
    ///
    /// Changes made through the returned reference do not reach the save
    /// path; call [`Settings::save`] afterwards to persist them.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.root.get_mut(key)
    }

    /// The whole document, as a live reference.
    pub fn document(&self) -> &Map {
        &self.root
    }

    /// Mutable access to the whole document.
    ///
    /// Changes made through the returned reference do not reach the save
    /// path; call [`Settings::save`] afterwards to persist them.
    pub fn document_mut(&mut self) -> &mut Map {
        &mut self.root
    }

    /// Walks a dotted path through nested maps (by key) and lists (by
    /// index), returning `None` on any miss. See [`Map::get_path`].
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        self.root.get_path(path)
    }

    /// Removes `key` and returns its value.
    ///
    /// A missing key returns `None` and does not touch the backing store.
    pub fn pop(&mut self, key: &str, save_now: bool) -> Option<Value> {
        let removed = self.root.remove(key);
        if removed.is_some() {
            self.autosave(save_now);
        }
        removed
    }

    /// Removes and returns the last entry in key order.
    ///
    /// An empty document returns `None` with no save and no error.
    pub fn pop_last(&mut self, save_now: bool) -> Option<(String, Value)> {
        let removed = self.root.pop_last();
        if removed.is_some() {
            self.autosave(save_now);
        }
        removed
    }

    /// Returns the value under `key`, inserting `default` first if the key
    /// is absent. The auto-save hook runs either way.
    pub fn get_or_insert(
        &mut self,
        key: impl Into<String>,
        default: impl Into<Value>,
        save_now: bool,
    ) -> &mut Value {
        let key = key.into();
        if !self.root.contains_key(&key) {
            self.root.insert(key.clone(), default);
        }
        self.autosave(save_now);
        // The key is present by now; the default here is never inserted.
        self.root.get_or_insert(key, Value::Null)
    }

    /// Merges `pairs` into the document, overwriting existing keys.
    pub fn merge<K, V, I>(&mut self, pairs: I, save_now: bool)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.root
            .merge(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self.autosave(save_now);
    }

    /// Empties the document.
    pub fn clear(&mut self, save_now: bool) {
        self.root.clear();
        self.autosave(save_now);
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Returns true if the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Returns true if `key` exists at the top level.
    pub fn contains_key(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    /// Iterates over top-level keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.root.keys()
    }

    /// The auto-save hook: every mutator funnels through here after
    /// applying its change.
    fn autosave(&self, save_now: bool) {
        if self.auto_save || save_now {
            self.persist();
        }
    }

    fn persist(&self) {
        let Some(binding) = &self.binding else {
            return;
        };
        if self.verbose {
            info!(
                name = %binding.name,
                location = %binding.handle.location(),
                "saving preferences"
            );
        }
        let bytes = match binding.codec.encode(&self.root) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(name = %binding.name, error = %err, "preferences not saved");
                return;
            }
        };
        if let Err(err) = binding.handle.write(&bytes) {
            warn!(
                name = %binding.name,
                location = %binding.handle.location(),
                error = %err,
                "preferences not saved"
            );
        }
    }
}

impl Drop for Settings {
    fn drop(&mut self) {
        // Final flush for bound stores, regardless of the auto-save flag.
        if self.binding.is_some() {
            self.persist();
        }
    }
}

/// Builder for bound [`Settings`] instances.
///
/// ```no_run
/// use prefstore_core::{Map, Settings};
///
/// let settings = Settings::named("com.example.myapp")
///     .with_auto_save(false)
///     .with_data(Map::new().with("theme", "dark"))
///     .open()?;
/// # Ok::<(), prefstore_core::SettingsError>(())
/// ```
pub struct SettingsBuilder {
    name: String,
    data: Option<Map>,
    auto_save: bool,
    verbose: bool,
    codec: Option<Arc<dyn Codec>>,
    handle: Option<Arc<dyn StorageHandle>>,
}

impl SettingsBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data: None,
            auto_save: true,
            verbose: false,
            codec: None,
            handle: None,
        }
    }

    /// Seeds the document instead of loading the backing file. Saves still
    /// target the bound location.
    pub fn with_data(mut self, data: Map) -> Self {
        self.data = Some(data);
        self
    }

    /// Sets whether mutations persist automatically (default true).
    pub fn with_auto_save(mut self, auto_save: bool) -> Self {
        self.auto_save = auto_save;
        self
    }

    /// Enables informational logging of load/save activity.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Substitutes the on-disk format (default: [`JsonCodec`]).
    pub fn with_codec(mut self, codec: impl Codec + 'static) -> Self {
        self.codec = Some(Arc::new(codec));
        self
    }

    /// Substitutes the backing location (default: a file named for the
    /// store in the per-user preference directory).
    pub fn with_handle(mut self, handle: impl StorageHandle + 'static) -> Self {
        self.handle = Some(Arc::new(handle));
        self
    }

    /// Builds the store, loading the backing file unless seed data was
    /// supplied.
    pub fn open(self) -> Result<Settings> {
        let codec: Arc<dyn Codec> = match self.codec {
            Some(codec) => codec,
            None => Arc::new(JsonCodec),
        };
        let handle: Arc<dyn StorageHandle> = match self.handle {
            Some(handle) => handle,
            None => Arc::new(FileHandle::new(paths::preference_file(
                &self.name,
                codec.extension(),
            ))),
        };

        let mut settings = Settings {
            binding: Some(Binding {
                name: self.name,
                handle,
                codec,
            }),
            auto_save: self.auto_save,
            verbose: self.verbose,
            root: Map::new(),
        };
        match self.data {
            Some(data) => settings.root = data,
            None => settings.load()?,
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SettingsError;
    use prefstore_persistence::PersistenceError;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;
    use tempfile::tempdir;

    fn prefs_path(dir: &Path) -> PathBuf {
        dir.join("test.json")
    }

    fn open_at(path: &Path) -> Settings {
        Settings::named("test")
            .with_handle(FileHandle::new(path))
            .open()
            .unwrap()
    }

    fn stored_document(path: &Path) -> Map {
        JsonCodec.decode(&fs::read(path).unwrap()).unwrap()
    }

    /// In-memory handle for byte-level assertions about saves.
    #[derive(Default)]
    struct MemoryHandle {
        bytes: Mutex<Option<Vec<u8>>>,
    }

    impl MemoryHandle {
        fn contents(&self) -> Option<Vec<u8>> {
            self.bytes.lock().unwrap().clone()
        }
    }

    impl StorageHandle for MemoryHandle {
        fn location(&self) -> String {
            "<memory>".to_string()
        }

        fn exists(&self) -> bool {
            self.bytes.lock().unwrap().is_some()
        }

        fn read(&self) -> prefstore_persistence::Result<Vec<u8>> {
            self.bytes
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| PersistenceError::NotFound(self.location()))
        }

        fn write(&self, bytes: &[u8]) -> prefstore_persistence::Result<()> {
            *self.bytes.lock().unwrap() = Some(bytes.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_open_starts_empty_when_file_missing() {
        let dir = tempdir().unwrap();
        let settings = open_at(&prefs_path(dir.path()));

        assert!(settings.is_empty());
        assert!(settings.is_bound());
        assert_eq!(settings.name(), Some("test"));
    }

    #[test]
    fn test_set_key_persists_immediately() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());
        let mut settings = open_at(&path);

        settings.set_key("count", 1, false);

        assert_eq!(
            stored_document(&path).get("count"),
            Some(&Value::Int(1))
        );
    }

    #[test]
    fn test_every_mutator_keeps_disk_in_sync() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());
        let mut settings = open_at(&path);

        settings.insert("a", 1);
        assert_eq!(stored_document(&path), *settings.document());

        settings.merge([("b".to_string(), Value::Int(2))], false);
        assert_eq!(stored_document(&path), *settings.document());

        settings.pop("a", false);
        assert_eq!(stored_document(&path), *settings.document());

        settings.get_or_insert("c", "x", false);
        assert_eq!(stored_document(&path), *settings.document());

        settings.pop_last(false);
        assert_eq!(stored_document(&path), *settings.document());

        settings.clear(false);
        assert_eq!(stored_document(&path), *settings.document());
    }

    #[test]
    fn test_auto_save_off_never_touches_disk() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());
        let mut settings = Settings::named("test")
            .with_handle(FileHandle::new(&path))
            .with_auto_save(false)
            .open()
            .unwrap();

        settings.set_key("a", 1, false);
        settings.insert("b", 2);
        settings.merge([("c".to_string(), Value::Int(3))], false);
        settings.clear(false);

        assert!(!path.exists());
        std::mem::forget(settings); // keep Drop's final flush out of this test
    }

    #[test]
    fn test_save_now_override_forces_write() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());
        let mut settings = Settings::named("test")
            .with_handle(FileHandle::new(&path))
            .with_auto_save(false)
            .open()
            .unwrap();

        settings.set_key("a", 1, true);

        assert_eq!(stored_document(&path).get("a"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_explicit_save_ignores_auto_save_flag() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());
        let mut settings = Settings::named("test")
            .with_handle(FileHandle::new(&path))
            .with_auto_save(false)
            .open()
            .unwrap();

        settings.set_key("a", 1, false);
        assert!(!path.exists());

        settings.save();
        assert_eq!(stored_document(&path).get("a"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_pop_missing_returns_none_and_never_saves() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());
        let mut settings = open_at(&path);

        assert_eq!(settings.pop("missing_key", false), None);
        assert_eq!(settings.pop("missing_key", true), None);

        // No mutation happened, so auto-save never ran and no file exists.
        assert!(!path.exists());
    }

    #[test]
    fn test_pop_present_saves_and_returns_value() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());
        let mut settings = open_at(&path);

        settings.set_key("k", "v", false);
        let popped = settings.pop("k", false);

        assert_eq!(popped, Some(Value::Text("v".to_string())));
        assert!(stored_document(&path).is_empty());
    }

    #[test]
    fn test_pop_last_on_empty_returns_none() {
        let dir = tempdir().unwrap();
        let mut settings = open_at(&prefs_path(dir.path()));

        assert_eq!(settings.pop_last(false), None);
    }

    #[test]
    fn test_pop_last_removes_last_in_key_order() {
        let dir = tempdir().unwrap();
        let mut settings = open_at(&prefs_path(dir.path()));
        settings.merge(
            [
                ("alpha".to_string(), Value::Int(1)),
                ("omega".to_string(), Value::Int(2)),
            ],
            false,
        );

        assert_eq!(
            settings.pop_last(false),
            Some(("omega".to_string(), Value::Int(2)))
        );
        assert_eq!(settings.len(), 1);
    }

    #[test]
    fn test_get_or_insert() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());
        let mut settings = open_at(&path);
        settings.set_key("present", 1, false);

        assert_eq!(*settings.get_or_insert("present", 99, false), Value::Int(1));
        assert_eq!(*settings.get_or_insert("absent", 99, false), Value::Int(99));
        assert_eq!(
            stored_document(&path).get("absent"),
            Some(&Value::Int(99))
        );
    }

    #[test]
    fn test_merge_overwrites_and_keeps_others() {
        let dir = tempdir().unwrap();
        let mut settings = open_at(&prefs_path(dir.path()));
        settings.set_keys([("a", 0), ("c", 3)], false);

        settings.merge([("a", 1), ("b", 2)], false);

        assert_eq!(settings.get("a"), Some(&Value::Int(1)));
        assert_eq!(settings.get("b"), Some(&Value::Int(2)));
        assert_eq!(settings.get("c"), Some(&Value::Int(3)));
        assert_eq!(
            settings.keys().collect::<Vec<_>>(),
            ["a", "b", "c"]
        );
    }

    #[test]
    fn test_set_keys_replaces_whole_document() {
        let dir = tempdir().unwrap();
        let mut settings = open_at(&prefs_path(dir.path()));
        settings.set_key("old", 1, false);

        settings.set_keys([("new", 2)], false);

        assert_eq!(settings.get("old"), None);
        assert_eq!(settings.get("new"), Some(&Value::Int(2)));
        assert_eq!(settings.len(), 1);
    }

    #[test]
    fn test_replace_and_clear_are_idempotent() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());
        let mut settings = open_at(&path);

        settings.replace(Map::new().with("x", 1), false);
        assert_eq!(settings.len(), 1);

        settings.clear(false);
        assert!(settings.is_empty());
        settings.clear(false);
        assert!(settings.is_empty());
        assert!(stored_document(&path).is_empty());
    }

    #[test]
    fn test_detached_nested_maps_share_the_document_type() {
        let settings = Settings::detached(Map::new().with("x", Map::new().with("y", 1)));

        assert_eq!(settings.get_path("x.y"), Some(&Value::Int(1)));
        assert!(settings.get("x").unwrap().as_map().is_some());
    }

    #[test]
    fn test_detached_forces_auto_save_off() {
        let mut settings = Settings::detached(Map::new());

        assert!(!settings.auto_save());
        assert!(!settings.set_auto_save(true));
        assert!(!settings.is_bound());

        // Mutations and explicit saves are pure in-memory operations.
        settings.set_key("a", 1, true);
        settings.save();
        assert_eq!(settings.get("a"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_reopen_reads_back_persisted_state() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());

        {
            let mut settings = open_at(&path);
            settings.set_key("count", 1, false);
        }

        let reopened = open_at(&path);
        assert_eq!(reopened.get_path("count"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_drop_flushes_even_with_auto_save_off() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());

        {
            let mut settings = Settings::named("test")
                .with_handle(FileHandle::new(&path))
                .with_auto_save(false)
                .open()
                .unwrap();
            settings.set_key("count", 1, false);
            assert!(!path.exists());
        }

        assert_eq!(stored_document(&path).get("count"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_direct_submap_mutation_is_not_observed() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());
        let mut settings = open_at(&path);
        settings.set_key("window", Map::new().with("width", 800), false);

        let before = fs::read(&path).unwrap();
        if let Some(window) = settings.get_mut("window").and_then(Value::as_map_mut) {
            window.insert("width", 1024);
        }
        assert_eq!(fs::read(&path).unwrap(), before);

        // Re-entering through the root save path picks the change up.
        settings.save();
        assert_eq!(
            stored_document(&path).get_path("window.width"),
            Some(&Value::Int(1024))
        );
    }

    #[test]
    fn test_document_mut_edits_persist_only_on_save() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());
        let mut settings = open_at(&path);
        settings.set_key("keep", true, false);

        settings.document_mut().insert("added", 1);
        assert_eq!(stored_document(&path).get("added"), None);

        settings.save();
        assert_eq!(stored_document(&path).get("added"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_with_data_skips_load() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());
        fs::write(&path, r#"{"from_disk": true}"#).unwrap();

        let settings = Settings::named("test")
            .with_handle(FileHandle::new(&path))
            .with_data(Map::new().with("seeded", true))
            .open()
            .unwrap();

        assert_eq!(settings.get("from_disk"), None);
        assert_eq!(settings.get("seeded"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_open_on_malformed_file_errors() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());
        fs::write(&path, b"{not json").unwrap();

        let result = Settings::named("test")
            .with_handle(FileHandle::new(&path))
            .open();

        assert!(matches!(
            result,
            Err(SettingsError::Persistence(PersistenceError::Decode(_)))
        ));
    }

    #[test]
    fn test_load_replaces_in_memory_state() {
        let dir = tempdir().unwrap();
        let path = prefs_path(dir.path());
        let mut settings = open_at(&path);
        settings.set_key("a", 1, false);

        // Another writer changes the backing file behind our back.
        fs::write(&path, r#"{"b": 2}"#).unwrap();
        settings.load().unwrap();

        assert_eq!(settings.get("a"), None);
        assert_eq!(settings.get("b"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_save_failure_is_swallowed_and_state_kept() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"plain file").unwrap();

        // A path whose parent is a regular file cannot be created.
        let mut settings = Settings::named("test")
            .with_handle(FileHandle::new(blocker.join("child/test.json")))
            .open()
            .unwrap();

        settings.set_key("a", 1, false);

        assert_eq!(settings.get("a"), Some(&Value::Int(1)));
        std::mem::forget(settings); // the Drop flush would fail the same way
    }

    #[test]
    fn test_injected_memory_handle_sees_every_save() {
        let handle = Arc::new(MemoryHandle::default());
        let mut settings = Settings::named("test")
            .with_handle(handle.clone())
            .open()
            .unwrap();

        settings.set_key("a", 1, false);

        let bytes = handle.contents().unwrap();
        assert_eq!(
            JsonCodec.decode(&bytes).unwrap(),
            Map::new().with("a", 1)
        );
    }

    #[test]
    fn test_get_path_misses_yield_none() {
        let settings = Settings::detached(Map::new().with("a", Map::new().with("b", 1)));

        assert_eq!(settings.get_path("a.b"), Some(&Value::Int(1)));
        assert_eq!(settings.get_path("a.b.c"), None);
        assert_eq!(settings.get_path("a.x"), None);
        assert_eq!(settings.get_path("z.b.c"), None);
    }
}
