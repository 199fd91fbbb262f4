//! Error types for the todo application.

use thiserror::Error;
use todomvc_core::storage::StorageError;
use todomvc_runtime::StoreError;

/// Errors surfaced to callers of the todo application
///
/// Storage failures inside the reducer's effects never show up here: the
/// shadow index and snapshot writer log and absorb them.
#[derive(Error, Debug)]
pub enum TodoError {
    /// The action names a kind the reducer does not handle
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// The action has no string `type` field
    #[error("Action is missing its \"type\" field")]
    MissingActionType,

    /// The action JSON or its payload could not be decoded
    #[error("Invalid action: {0}")]
    InvalidAction(#[source] serde_json::Error),

    /// Filter name or route not recognized
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// Opening or reading the configured storage failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The store refused the action
    #[error(transparent)]
    Store(#[from] StoreError),
}
