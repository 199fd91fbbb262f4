//! Configuration management for the todo application.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::shadow::DEFAULT_SHADOW_KEY;
use crate::snapshot::DEFAULT_PRIMARY_KEY;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use todomvc_runtime::StoreConfig;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoConfig {
    /// JSON file backing the key-value store; in-memory when unset
    pub storage_path: Option<PathBuf>,
    /// Key holding the full todo list
    pub primary_key: String,
    /// Key holding the shadow title index
    pub shadow_key: String,
    /// Bound on actions fed back by effects per dispatch
    pub max_feedback_depth: usize,
    /// Log filter directive (trace, debug, info, warn, error)
    pub log_level: String,
}

impl TodoConfig {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// missing or unparseable values.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            storage_path: lookup("TODOMVC_STORAGE_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            primary_key: lookup("TODOMVC_PRIMARY_KEY").unwrap_or(defaults.primary_key),
            shadow_key: lookup("TODOMVC_SHADOW_KEY").unwrap_or(defaults.shadow_key),
            max_feedback_depth: lookup("TODOMVC_MAX_FEEDBACK_DEPTH")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_feedback_depth),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Store runtime settings derived from this configuration
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default().with_max_feedback_depth(self.max_feedback_depth)
    }
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
            shadow_key: DEFAULT_SHADOW_KEY.to_string(),
            max_feedback_depth: StoreConfig::DEFAULT_MAX_FEEDBACK_DEPTH,
            log_level: "info".to_string(),
        }
    }
}
