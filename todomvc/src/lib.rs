//! TodoMVC reducer with a best-effort shadow title index.
//!
//! This crate holds the todo list domain:
//!
//! - [`TodoState`]: the ordered list of [`Todo`] records
//! - [`TodoAction`]: the seven list operations, with a JSON wire form
//! - [`TodoReducer`]: pure transitions, plus storage effects
//! - [`ShadowIndex`]: a secondary title index that only records every
//!   second created title
//! - [`SnapshotStore`]: whole-list persistence
//!
//! # Quick Start
//!
//! ```no_run
//! use todomvc::{TodoAction, TodoConfig};
//!
//! # async fn example() -> Result<(), todomvc::TodoError> {
//! let config = TodoConfig::from_env();
//! let store = todomvc::build_store(&config, todomvc::open_storage(&config)?);
//!
//! store.send(TodoAction::add("buy some cheese")).await?;
//! todomvc::dispatch_json(&store, r#"{"type":"TOGGLE_ALL","payload":{"completed":true}}"#).await?;
//!
//! let state = store.state(Clone::clone).await;
//! println!("{}", state.counter_text());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod reducer;
pub mod shadow;
pub mod snapshot;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::TodoConfig;
pub use error::TodoError;
pub use id::NanoIdGenerator;
pub use reducer::{TodoEnvironment, TodoReducer, Transition, transition};
pub use shadow::{ShadowIndex, ShadowOp};
pub use snapshot::SnapshotStore;
pub use storage::JsonFileStorage;
pub use types::{Filter, Todo, TodoAction, TodoId, TodoState};

use std::sync::Arc;
use todomvc_core::environment::SystemClock;
use todomvc_core::storage::KeyValueStore;
use todomvc_runtime::Store;
use todomvc_testing::InMemoryStorage;

/// Store specialized for the todo reducer
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Open the storage backend named by `config`
///
/// A JSON file when `storage_path` is set, otherwise a process-local map.
///
/// # Errors
///
/// Returns [`TodoError::Storage`] if the file storage cannot be opened.
pub fn open_storage(config: &TodoConfig) -> Result<Arc<dyn KeyValueStore>, TodoError> {
    match &config.storage_path {
        Some(path) => Ok(Arc::new(JsonFileStorage::open(path)?)),
        None => {
            tracing::info!("No storage path configured, todos will not outlive the process");
            Ok(Arc::new(InMemoryStorage::new()))
        },
    }
}

/// Build a store whose initial state is the persisted snapshot
///
/// Ids come from [`NanoIdGenerator`] and shadow timestamps from the system
/// clock.
#[must_use]
pub fn build_store(config: &TodoConfig, storage: Arc<dyn KeyValueStore>) -> TodoStore {
    let snapshots = SnapshotStore::new(Arc::clone(&storage)).with_key(&config.primary_key);
    let initial = TodoState::from(snapshots.load());
    tracing::info!(items = initial.len(), key = snapshots.key(), "Loaded todo snapshot");

    let shadow = ShadowIndex::new(storage, Arc::new(SystemClock)).with_key(&config.shadow_key);
    let env = TodoEnvironment::new(Arc::new(NanoIdGenerator::new()), Arc::new(shadow))
        .with_snapshots(Arc::new(snapshots));

    Store::with_config(initial, TodoReducer::new(), env, config.store_config())
}

/// Parse a JSON action and send it to `store`
///
/// Parsing happens before the store is touched, so a rejected action leaves
/// the state exactly as it was.
///
/// # Errors
///
/// - [`TodoError::UnknownAction`], [`TodoError::MissingActionType`] or
///   [`TodoError::InvalidAction`] if the action cannot be parsed
/// - [`TodoError::Store`] if the store rejects it
pub async fn dispatch_json(store: &TodoStore, raw: &str) -> Result<(), TodoError> {
    let action = TodoAction::from_json(raw).inspect_err(|err| {
        tracing::error!(error = %err, "Rejected action");
    })?;
    store.send(action).await?;
    Ok(())
}
