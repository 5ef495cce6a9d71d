//! Key-value persistence with JSON values
//!
//! Values are stored as JSON strings under plain string keys. [`load_json`] and
//! [`save_json`] are best-effort: failures are logged and reported as
//! `None`/`false` so callers can fall back to defaults.

use crate::constants::storage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by a key-value store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No data directory available on this platform")]
    NoDataDir,
}

/// String-keyed store of JSON-encoded values
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Reads and decodes `key`, logging and returning `None` on any failure
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            log::warn!("Failed to read '{}': {}", key, err);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Ignoring unreadable value for '{}': {}", key, err);
            None
        }
    }
}

/// Encodes and writes `value` under `key`, logging and returning false on failure
pub fn save_json<T: Serialize + ?Sized>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> bool {
    let encoded = match serde_json::to_string(value) {
        Ok(encoded) => encoded,
        Err(err) => {
            log::warn!("Failed to encode '{}': {}", key, err);
            return false;
        }
    };
    match store.set(key, encoded) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Failed to write '{}': {}", key, err);
            false
        }
    }
}

/// In-memory store, lost on exit
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }
}

/// Store backed by a single JSON object on disk, rewritten on every change
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        log::debug!("Opened store {} with {} keys", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    /// Opens the store in the platform data directory
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(Self::default_path()?)
    }

    /// `<data dir>/flowcanvas/store.json`
    pub fn default_path() -> Result<PathBuf, StoreError> {
        let base = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(base.join(storage::APP_DIR).join(storage::STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("flowcanvas-test-{}", uuid::Uuid::new_v4()))
            .join("store.json")
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        volume: u8,
        name: String,
    }

    #[test]
    fn test_memory_store_basic_operations() {
        let mut store = MemoryStore::new();
        store.set("a", "1".to_string()).unwrap();
        store.set("b", "2".to_string()).unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_helpers_round_trip() {
        let mut store = MemoryStore::new();
        let prefs = Prefs {
            volume: 7,
            name: "مرحبا".to_string(),
        };
        assert!(save_json(&mut store, "prefs", &prefs));
        assert_eq!(load_json::<Prefs>(&store, "prefs"), Some(prefs));
        assert_eq!(load_json::<Prefs>(&store, "missing"), None);
    }

    #[test]
    fn test_load_json_ignores_wrong_shape() {
        let mut store = MemoryStore::new();
        store.set("prefs", "[1, 2, 3]".to_string()).unwrap();
        assert_eq!(load_json::<Prefs>(&store, "prefs"), None);
    }

    #[test]
    fn test_file_store_persists_between_opens() {
        let path = temp_path();
        {
            let mut store = FileStore::open(&path).unwrap();
            assert!(save_json(&mut store, "theme", &"light"));
            store.set("gone", "1".to_string()).unwrap();
            store.remove("gone").unwrap();
        }
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(load_json::<String>(&reopened, "theme").as_deref(), Some("light"));
        assert_eq!(reopened.get("gone").unwrap(), None);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ definitely not json").unwrap();
        assert!(matches!(FileStore::open(&path), Err(StoreError::Json(_))));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_clear_empties_file() {
        let path = temp_path();
        let mut store = FileStore::open(&path).unwrap();
        store.set("k", "\"v\"".to_string()).unwrap();
        store.clear().unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap(), None);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
