//! Key-value storage trait and related types.
//!
//! The todo application persists two independent string values: the full
//! todo list and the shadow title index. Both go through [`KeyValueStore`],
//! a deliberately small synchronous interface in the shape of browser
//! `localStorage`: string keys, string values, get/set/remove.
//!
//! # Implementations
//!
//! - `JsonFileStorage` (in `todomvc` crate): single JSON file on disk
//! - `InMemoryStorage` / `FailingStorage` (in `todomvc-testing` crate): fast,
//!   deterministic testing

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend is not reachable or refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the backend's capacity.
    #[error("Storage quota exceeded writing '{key}' ({required} bytes, limit {limit})")]
    QuotaExceeded {
        /// Key being written
        key: String,
        /// Total bytes the write would have required
        required: usize,
        /// Configured limit in bytes
        limit: usize,
    },

    /// Underlying I/O failure.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend contents could not be decoded.
    #[error("Storage backend is corrupt: {0}")]
    Corrupt(String),
}

/// Synchronous string key-value store.
///
/// Calls complete immediately; there is no async variant because the
/// callers (reducer effects) run to completion on the dispatching task.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend rejects the delete.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
