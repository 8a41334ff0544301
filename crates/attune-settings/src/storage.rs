//! Settings Persistence
//!
//! One JSON blob under a fixed key. Absent or malformed data means
//! "use defaults" and is never surfaced to the caller.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::settings::{Settings, SettingsUpdate};

/// Fixed key the settings blob lives under.
pub const STORAGE_KEY: &str = "attune.settings";

/// Shared single-threaded handle to a storage backend.
pub type SharedStorage = Rc<RefCell<dyn StorageBackend>>;

/// Key/value persistence the host provides (localStorage or equivalent).
pub trait StorageBackend {
    fn read(&self, key: &str) -> Option<String>;

    /// Returns false when the write could not be honored (quota,
    /// storage unavailable). Callers degrade silently either way.
    fn write(&mut self, key: &str, value: &str) -> bool;
}

/// In-memory backend for tests and headless embeddings.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> bool {
        self.items.insert(key.to_string(), value.to_string());
        true
    }
}

/// Backend that persists nothing; exercises the degraded path.
#[derive(Debug, Default)]
pub struct NullStorage;

impl StorageBackend for NullStorage {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn write(&mut self, _key: &str, _value: &str) -> bool {
        false
    }
}

/// Read the persisted blob as a partial record.
///
/// A corrupt blob is discarded with a warning; it must never fail
/// store construction.
pub fn load_saved(storage: &dyn StorageBackend) -> Option<SettingsUpdate> {
    let blob = storage.read(STORAGE_KEY)?;
    match serde_json::from_str(&blob) {
        Ok(saved) => Some(saved),
        Err(err) => {
            tracing::warn!("discarding corrupt settings blob: {err}");
            None
        }
    }
}

/// Persist the full record. Failures degrade silently.
pub fn save_settings(storage: &mut dyn StorageBackend, settings: &Settings) {
    match serde_json::to_string(settings) {
        Ok(blob) => {
            if !storage.write(STORAGE_KEY, &blob) {
                tracing::warn!("settings persistence unavailable");
            }
        }
        Err(err) => tracing::warn!("failed to encode settings: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FontSize;

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        let settings = Settings { font_size: FontSize::Largest, ..Settings::default() };

        save_settings(&mut storage, &settings);
        let saved = load_saved(&storage).unwrap();
        assert_eq!(saved.font_size, Some(FontSize::Largest));
        assert_eq!(saved.language.as_deref(), Some("en"));
    }

    #[test]
    fn test_corrupt_blob_is_discarded() {
        let mut storage = MemoryStorage::new();
        storage.write(STORAGE_KEY, "{not json");
        assert!(load_saved(&storage).is_none());
    }

    #[test]
    fn test_null_storage_degrades() {
        let mut storage = NullStorage;
        save_settings(&mut storage, &Settings::default());
        assert!(load_saved(&storage).is_none());
    }
}
