//! Shadow title index.
//!
//! A secondary, title-only record of created todos kept under its own storage
//! key as a JSON object of `{ "<ISO-8601 timestamp>": "<title>" }`. It is not
//! a mirror of the list: only every second `record_title` call writes
//! anything, so the index holds the 2nd, 4th, 6th... created titles.
//!
//! Every operation is best effort. Storage and decoding failures are logged
//! and dropped; nothing here can fail a state transition.

use chrono::SecondsFormat;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use todomvc_core::environment::Clock;
use todomvc_core::storage::{KeyValueStore, StorageError};

/// Storage key used when none is configured.
pub const DEFAULT_SHADOW_KEY: &str = "todo-items";

/// Timestamp → title entries, enumerated in ascending key order.
pub type ShadowEntries = BTreeMap<String, String>;

/// Stored object as decoded; values that are not strings are carried along
/// untouched.
type StoredEntries = Map<String, Value>;

/// Shadow index update requested by a reducer transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShadowOp {
    /// A todo was created with this title
    RecordTitle(String),
    /// A todo with this title was removed
    RemoveTitle(String),
    /// Todos with these titles were removed together
    RemoveTitles(Vec<String>),
    /// Every todo was removed
    Clear,
}

impl ShadowOp {
    /// Effect label for this operation
    #[must_use]
    pub const fn effect_name(&self) -> &'static str {
        match self {
            Self::RecordTitle(_) => "shadow.record_title",
            Self::RemoveTitle(_) => "shadow.remove_title",
            Self::RemoveTitles(_) => "shadow.remove_titles",
            Self::Clear => "shadow.clear",
        }
    }
}

#[derive(Error, Debug)]
enum ShadowError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("shadow index is not a JSON object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Best-effort title index over a [`KeyValueStore`]
///
/// The creation counter lives on the instance; build a fresh index (or call
/// [`ShadowIndex::reset_counter`]) to start counting from zero.
pub struct ShadowIndex {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    key: String,
    created: AtomicU64,
}

impl ShadowIndex {
    /// Index stored under [`DEFAULT_SHADOW_KEY`]
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            key: DEFAULT_SHADOW_KEY.to_string(),
            created: AtomicU64::new(0),
        }
    }

    /// Store the index under `key` instead
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Storage key of this index
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of `record_title` calls so far
    #[must_use]
    pub fn counter(&self) -> u64 {
        self.created.load(Ordering::SeqCst)
    }

    /// Start counting creations from zero again
    pub fn reset_counter(&self) {
        self.created.store(0, Ordering::SeqCst);
    }

    /// Apply a reducer-requested update
    pub fn apply(&self, op: ShadowOp) {
        match op {
            ShadowOp::RecordTitle(title) => self.record_title(&title),
            ShadowOp::RemoveTitle(title) => self.remove_title(&title),
            ShadowOp::RemoveTitles(titles) => self.remove_titles(&titles),
            ShadowOp::Clear => self.clear_all(),
        }
    }

    /// Count a creation and persist `title` when the count is even
    ///
    /// Odd-numbered creations are dropped. An unreadable index is replaced
    /// by a fresh one holding just this entry.
    pub fn record_title(&self, title: &str) {
        let count = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        if count % 2 != 0 {
            tracing::trace!(count, "Skipping shadow write for odd creation");
            return;
        }

        let mut entries = match self.read() {
            Ok(entries) => entries,
            Err(ShadowError::Json(err)) => {
                tracing::warn!(key = %self.key, error = %err, "Discarding unreadable shadow index");
                StoredEntries::new()
            },
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "Failed to save todo title to shadow index");
                return;
            },
        };

        let timestamp = self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true);
        entries.insert(timestamp, Value::String(title.to_string()));

        if let Err(err) = self.write(&entries) {
            tracing::error!(key = %self.key, error = %err, "Failed to save todo title to shadow index");
        }
    }

    /// Drop the first entry whose title equals `title`
    ///
    /// With duplicate titles, which entry goes is decided by key order and
    /// need not match the record removed from the list.
    pub fn remove_title(&self, title: &str) {
        let mut entries = match self.read() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "Failed to remove todo title from shadow index");
                return;
            },
        };

        if !remove_first(&mut entries, title) {
            tracing::trace!(title, "Title not present in shadow index");
            return;
        }

        if let Err(err) = self.write(&entries) {
            tracing::error!(key = %self.key, error = %err, "Failed to remove todo title from shadow index");
        }
    }

    /// Drop one entry per title against a single read, then write once
    pub fn remove_titles(&self, titles: &[String]) {
        let result = self.read().and_then(|mut entries| {
            for title in titles {
                remove_first(&mut entries, title);
            }
            self.write(&entries)
        });

        if let Err(err) = result {
            tracing::error!(key = %self.key, error = %err, "Failed to remove todo titles from shadow index");
        }
    }

    /// Delete the whole index
    pub fn clear_all(&self) {
        if let Err(err) = self.storage.remove(&self.key) {
            tracing::error!(key = %self.key, error = %err, "Failed to clear shadow index");
        }
    }

    /// Current title entries, or empty when the index is missing or unreadable
    ///
    /// Stored entries whose value is not a string are left out.
    #[must_use]
    pub fn entries(&self) -> ShadowEntries {
        match self.read() {
            Ok(stored) => stored
                .into_iter()
                .filter_map(|(key, value)| match value {
                    Value::String(title) => Some((key, title)),
                    _ => None,
                })
                .collect(),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "Shadow index unreadable");
                ShadowEntries::new()
            },
        }
    }

    fn read(&self) -> Result<StoredEntries, ShadowError> {
        match self.storage.get(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(StoredEntries::new()),
        }
    }

    fn write(&self, entries: &StoredEntries) -> Result<(), ShadowError> {
        let raw = serde_json::to_string(entries)?;
        self.storage.set(&self.key, &raw)?;
        Ok(())
    }
}

impl std::fmt::Debug for ShadowIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadowIndex")
            .field("key", &self.key)
            .field("created", &self.counter())
            .finish_non_exhaustive()
    }
}

fn remove_first(entries: &mut StoredEntries, title: &str) -> bool {
    let key = entries
        .iter()
        .find(|(_, value)| value.as_str() == Some(title))
        .map(|(key, _)| key.clone());

    key.is_some_and(|key| entries.remove(&key).is_some())
}
