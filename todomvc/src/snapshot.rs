//! Primary state persistence.
//!
//! The full todo list is stored as a JSON array under one key and rewritten
//! after every change. Reads and writes are best effort, like the shadow
//! index: a failure is logged and the in-memory list stays authoritative.

use crate::types::Todo;
use std::sync::Arc;
use todomvc_core::storage::KeyValueStore;

/// Storage key used when none is configured.
pub const DEFAULT_PRIMARY_KEY: &str = "react-todos";

/// Reads and writes whole-list snapshots
pub struct SnapshotStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl SnapshotStore {
    /// Snapshots stored under [`DEFAULT_PRIMARY_KEY`]
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            key: DEFAULT_PRIMARY_KEY.to_string(),
        }
    }

    /// Store snapshots under `key` instead
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Storage key of the snapshot
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrite the stored list
    pub fn save(&self, todos: &[Todo]) {
        let raw = match serde_json::to_string(todos) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "Failed to encode todo snapshot");
                return;
            },
        };

        match self.storage.set(&self.key, &raw) {
            Ok(()) => tracing::debug!(key = %self.key, items = todos.len(), "Saved todo snapshot"),
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "Failed to save todo snapshot");
            },
        }
    }

    /// Stored list, or empty when missing or unreadable
    #[must_use]
    pub fn load(&self) -> Vec<Todo> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "Failed to read todo snapshot");
                return Vec::new();
            },
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(key = %self.key, error = %err, "Ignoring unreadable todo snapshot");
            Vec::new()
        })
    }
}

impl std::fmt::Debug for SnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
