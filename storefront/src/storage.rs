//! Durable client-side storage.
//!
//! A string key/value store in the shape of browser `localStorage`. Values are
//! JSON documents written as a full overwrite. The medium is shared and
//! unsynchronized across processes: the last writer wins.
//!
//! Reads degrade gracefully. A missing key and a malformed document both come
//! back as "no data" from [`load_json_or_default`], with the parse failure logged.

use crate::error::StorageError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Storage key for the persisted cart item list
pub const CART_KEY: &str = "cart";

/// Storage key for the recent search list
pub const RECENT_SEARCHES_KEY: &str = "recentSearches";

/// Key/value storage shared by every storefront feature.
///
/// Implementations must be cheap to call from reducers and effects; all
/// methods are synchronous.
pub trait ClientStorage: Send + Sync {
    /// Read the raw value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key` (missing keys are fine)
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.read().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_| StorageError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}

/// Directory-backed storage: one `<key>.json` file per key.
///
/// Writes go to a temporary sibling file that is renamed over the target, so
/// a reader never sees a half-written document.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `root`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory holding the stored files
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl ClientStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// Load and decode the JSON value stored under `key`
///
/// # Errors
///
/// Returns an error if the medium cannot be read or the document is malformed.
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn ClientStorage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    storage
        .get_item(key)?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(StorageError::from)
}

/// Load the JSON value under `key`, treating any failure as absence of data
///
/// Failures are logged, never returned.
pub fn load_json_or_default<T: DeserializeOwned + Default>(
    storage: &dyn ClientStorage,
    key: &str,
) -> T {
    match load_json(storage, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(error) => {
            tracing::warn!(key, %error, "Discarding unreadable stored value");
            T::default()
        },
    }
}

/// Encode `value` as JSON and overwrite `key`
///
/// # Errors
///
/// Returns an error if encoding fails or the medium cannot be written.
pub fn save_json<T: Serialize + ?Sized>(
    storage: &dyn ClientStorage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.set_item(key, &raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips_values() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("cart").unwrap(), None);

        storage.set_item("cart", "[]").unwrap();
        assert_eq!(storage.get_item("cart").unwrap().as_deref(), Some("[]"));

        storage.remove_item("cart").unwrap();
        storage.remove_item("cart").unwrap();
        assert_eq!(storage.get_item("cart").unwrap(), None);
    }

    #[test]
    fn file_storage_overwrites_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("nested")).unwrap();

        storage.set_item("recentSearches", "[\"rust\"]").unwrap();
        storage.set_item("recentSearches", "[\"go\"]").unwrap();
        assert_eq!(
            storage.get_item("recentSearches").unwrap().as_deref(),
            Some("[\"go\"]")
        );

        storage.remove_item("recentSearches").unwrap();
        assert_eq!(storage.get_item("recentSearches").unwrap(), None);
    }

    #[test]
    fn file_storage_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        assert!(matches!(
            storage.set_item("../cart", "[]"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(storage.get_item(""), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn malformed_json_degrades_to_default() {
        let storage = MemoryStorage::new();
        storage.set_item(RECENT_SEARCHES_KEY, "not-json").unwrap();

        assert!(load_json::<Vec<String>>(&storage, RECENT_SEARCHES_KEY).is_err());
        let loaded: Vec<String> = load_json_or_default(&storage, RECENT_SEARCHES_KEY);
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_then_load_json() {
        let storage = MemoryStorage::new();
        save_json(&storage, RECENT_SEARCHES_KEY, &["rust", "go"]).unwrap();

        let loaded: Option<Vec<String>> = load_json(&storage, RECENT_SEARCHES_KEY).unwrap();
        assert_eq!(loaded, Some(vec!["rust".to_string(), "go".to_string()]));
    }
}
