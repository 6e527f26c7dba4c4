//! Key-value storage backends
//!
//! The preference layer only needs `get`/`set` on string keys. The file
//! backend keeps every key in one JSON document under the state directory,
//! the memory backend is for tests and for running without a home
//! directory.

use crate::error::GuideError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Minimal string key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, GuideError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), GuideError>;
}

/// In-memory storage, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, GuideError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GuideError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage that is never available (no home directory, read-only setups)
#[derive(Debug, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, GuideError> {
        Err(GuideError::Storage("storage unavailable".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), GuideError> {
        Err(GuideError::Storage("storage unavailable".to_string()))
    }
}

/// One stored value with the time it was written
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    value: String,
    saved_at: DateTime<Local>,
}

/// JSON file holding all stored keys
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    entries: BTreeMap<String, StoredEntry>,
}

/// Storage persisted to `preferences.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub const FILE_NAME: &'static str = "preferences.json";

    /// Store inside `dir`; the directory is created on first write
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(Self::FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<StoreFile, GuideError> {
        if !self.path.exists() {
            return Ok(StoreFile::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, GuideError> {
        let file = self.read_file()?;
        Ok(file.entries.get(key).map(|entry| entry.value.clone()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GuideError> {
        // A corrupt file is replaced rather than blocking every later save
        let mut file = self.read_file().unwrap_or_default();
        file.entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                saved_at: Local::now(),
            },
        );

        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_unavailable_store_errors() {
        let mut store = UnavailableStore;
        assert!(store.get("k").is_err());
        assert!(store.set("k", "v").is_err());
    }

    #[test]
    fn test_json_store_survives_new_instance() {
        let dir = TempDir::new().unwrap();
        let state_dir = dir.path().join("state");

        let mut store = JsonFileStore::in_dir(&state_dir);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.set("a", "3").unwrap();

        let reopened = JsonFileStore::in_dir(&state_dir);
        assert_eq!(reopened.get("a").unwrap(), Some("3".to_string()));
        assert_eq!(reopened.get("b").unwrap(), Some("2".to_string()));
        assert_eq!(reopened.get("c").unwrap(), None);
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        assert_eq!(store.get("a").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_json_store_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::in_dir(dir.path());
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.get("a").is_err());
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap(), Some("1".to_string()));
    }
}
