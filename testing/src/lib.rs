//! # TodoMVC Testing
//!
//! Testing utilities and helpers for the TodoMVC reducer architecture.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits (clocks, id generators)
//! - In-memory and always-failing [`KeyValueStore`] backends
//! - [`ReducerTest`], a Given-When-Then builder for reducers
//!
//! ## Example
//!
//! ```
//! use todomvc_core::storage::KeyValueStore;
//! use todomvc_testing::InMemoryStorage;
//!
//! let storage = InMemoryStorage::new();
//! storage.set("react-todos", "[]").unwrap();
//! assert_eq!(storage.get("react-todos").unwrap().as_deref(), Some("[]"));
//! ```
//!
//! [`KeyValueStore`]: todomvc_core::storage::KeyValueStore

use chrono::{DateTime, Utc};
use todomvc_core::environment::{Clock, IdGenerator};
use todomvc_core::storage::{KeyValueStore, StorageError};

pub mod reducer_test;

pub use reducer_test::{ReducerTest, assertions, run_effects};

/// Mock implementations of Environment traits
pub mod mocks {
    #![allow(clippy::unwrap_used)] // Poisoned locks only happen after a test already panicked

    use super::{Clock, DateTime, IdGenerator, KeyValueStore, StorageError, Utc};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
    use std::sync::{Arc, RwLock};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todomvc_testing::mocks::FixedClock;
    /// use todomvc_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(epoch())
    }

    /// Clock that advances by a fixed step on every reading
    ///
    /// Useful wherever timestamps double as map keys and must not collide.
    ///
    /// ```
    /// use todomvc_testing::mocks::SteppingClock;
    /// use todomvc_core::environment::Clock;
    ///
    /// let clock = SteppingClock::from_test_epoch(1_000);
    /// let first = clock.now();
    /// let second = clock.now();
    /// assert_eq!((second - first).num_milliseconds(), 1_000);
    /// ```
    #[derive(Debug)]
    pub struct SteppingClock {
        start: DateTime<Utc>,
        step_ms: i64,
        ticks: AtomicI64,
    }

    impl SteppingClock {
        /// Start at `start`, advancing `step_ms` milliseconds per reading
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step_ms: i64) -> Self {
            Self {
                start,
                step_ms,
                ticks: AtomicI64::new(0),
            }
        }

        /// Start at 2025-01-01 00:00:00 UTC
        #[must_use]
        pub fn from_test_epoch(step_ms: i64) -> Self {
            Self::new(epoch(), step_ms)
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let tick = self.ticks.fetch_add(1, Ordering::Relaxed);
            self.start + chrono::TimeDelta::milliseconds(tick * self.step_ms)
        }
    }

    /// Predictable identifiers: `id-1`, `id-2`, ...
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        prefix: String,
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Generator producing `id-1`, `id-2`, ...
        #[must_use]
        pub fn new() -> Self {
            Self::with_prefix("id")
        }

        /// Generator producing `{prefix}-1`, `{prefix}-2`, ...
        #[must_use]
        pub fn with_prefix(prefix: impl Into<String>) -> Self {
            Self {
                prefix: prefix.into(),
                next: AtomicU64::new(1),
            }
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::Relaxed);
            format!("{}-{n}", self.prefix)
        }
    }

    /// In-memory key-value store for fast, deterministic testing.
    ///
    /// Clones share the same underlying map, so a test can keep a handle
    /// while the code under test owns another.
    #[derive(Clone, Debug, Default)]
    pub struct InMemoryStorage {
        data: Arc<RwLock<HashMap<String, String>>>,
        quota: Option<usize>,
        fail_writes: Arc<AtomicBool>,
    }

    impl InMemoryStorage {
        /// Create a new empty store without a size limit
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a store that rejects writes once keys plus values exceed `bytes`
        #[must_use]
        pub fn with_quota(bytes: usize) -> Self {
            Self {
                quota: Some(bytes),
                ..Self::default()
            }
        }

        /// Make every subsequent `set`/`remove` fail (reads keep working)
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::Release);
        }

        /// Raw value under `key`, bypassing the trait
        #[must_use]
        pub fn raw(&self, key: &str) -> Option<String> {
            self.data.read().unwrap().get(key).cloned()
        }

        /// Overwrite `key` directly, bypassing quota and failure injection
        pub fn put_raw(&self, key: &str, value: &str) {
            self.data
                .write()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }

        /// Check if a key exists in the store
        #[must_use]
        pub fn contains_key(&self, key: &str) -> bool {
            self.data.read().unwrap().contains_key(key)
        }

        /// Number of stored keys
        #[must_use]
        pub fn len(&self) -> usize {
            self.data.read().unwrap().len()
        }

        /// Check if the store is empty
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.data.read().unwrap().is_empty()
        }

        fn check_writable(&self) -> Result<(), StorageError> {
            if self.fail_writes.load(Ordering::Acquire) {
                return Err(StorageError::Unavailable("writes disabled".to_string()));
            }
            Ok(())
        }
    }

    impl KeyValueStore for InMemoryStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.data.read().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.check_writable()?;
            let mut data = self.data.write().unwrap();
            if let Some(limit) = self.quota {
                let others: usize = data
                    .iter()
                    .filter(|(k, _)| k.as_str() != key)
                    .map(|(k, v)| k.len() + v.len())
                    .sum();
                let required = others + key.len() + value.len();
                if required > limit {
                    return Err(StorageError::QuotaExceeded {
                        key: key.to_string(),
                        required,
                        limit,
                    });
                }
            }
            data.insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.check_writable()?;
            self.data.write().unwrap().remove(key);
            Ok(())
        }
    }

    /// Storage whose every operation fails, for exercising error absorption.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct FailingStorage;

    impl KeyValueStore for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("storage offline".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("storage offline".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("storage offline".to_string()))
        }
    }

    fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default()
    }
}

// Re-export commonly used items
pub use mocks::{
    FailingStorage, FixedClock, InMemoryStorage, SequentialIdGenerator, SteppingClock, test_clock,
};
