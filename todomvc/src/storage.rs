//! File-backed key-value storage.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use todomvc_core::storage::{KeyValueStore, StorageError};

/// All keys of one namespace kept in a single JSON object file
///
/// Every call re-reads the file, so external edits are picked up. Writes go
/// to a sibling temporary file that is then renamed over the original.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStorage {
    /// Use the file at `path`, creating parent directories as needed
    ///
    /// A missing file is treated as an empty namespace.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        tracing::debug!(path = %path.display(), "Opened file storage");
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|err| {
                StorageError::Corrupt(format!("{}: {err}", self.path.display()))
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn persist(&self, data: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(data)
            .map_err(|err| StorageError::Corrupt(err.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn modify<F>(&self, edit: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))?;
        let mut data = self.load()?;
        if edit(&mut data) {
            self.persist(&data)?;
        }
        Ok(())
    }
}

impl KeyValueStore for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|data| {
            data.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.modify(|data| data.remove(key).is_some())
    }
}
