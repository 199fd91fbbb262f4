//! Domain types for the todo list.
//!
//! A todo list is an ordered sequence of [`Todo`] records. New records are
//! appended, and every other change is addressed by [`TodoId`].

use crate::error::TodoError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unique identifier for a todo item
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Wraps an identifier string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, fixed at creation
    pub id: TodoId,
    /// Title/description of the todo
    pub title: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl Todo {
    /// Creates a new, not yet completed todo item
    #[must_use]
    pub fn new(id: TodoId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }
}

/// Which subset of the list a view shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Every todo
    #[default]
    All,
    /// Todos not yet completed
    Active,
    /// Completed todos
    Completed,
}

impl Filter {
    /// Returns true if `todo` belongs in this view
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }

    /// Hash route for this view (`#/`, `#/active`, `#/completed`)
    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::All => "#/",
            Self::Active => "#/active",
            Self::Completed => "#/completed",
        }
    }
}

impl FromStr for Filter {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches("#/").trim_start_matches('/') {
            "" | "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(TodoError::UnknownFilter(s.to_string())),
        }
    }
}

/// State of the todo list
///
/// Serializes as a bare JSON array of todos.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoState {
    /// Todos in insertion order
    pub todos: Vec<Todo>,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub const fn new() -> Self {
        Self { todos: Vec::new() }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Returns true if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    /// Titles in list order
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.todos.iter().map(|todo| todo.title.as_str()).collect()
    }

    /// Number of todos not yet completed
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.completed).count()
    }

    /// True when the list is non-empty and every todo is completed
    #[must_use]
    pub fn all_completed(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(|todo| todo.completed)
    }

    /// Todos shown under `filter`, in list order
    pub fn visible(&self, filter: Filter) -> impl Iterator<Item = &Todo> {
        self.todos.iter().filter(move |todo| filter.matches(todo))
    }

    /// Footer counter, e.g. `1 item left`, `3 items left`
    #[must_use]
    pub fn counter_text(&self) -> String {
        match self.active_count() {
            1 => "1 item left".to_string(),
            n => format!("{n} items left"),
        }
    }
}

impl From<Vec<Todo>> for TodoState {
    fn from(todos: Vec<Todo>) -> Self {
        Self { todos }
    }
}

/// Requests to change the todo list
///
/// On the wire an action is `{"type": "ADD_ITEM", "payload": {"title": "..."}}`;
/// payload-less kinds omit `payload`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    /// Append a new todo
    AddItem {
        /// Title of the new todo
        title: String,
    },

    /// Replace the title of a todo
    UpdateItem {
        /// Todo to rename
        id: TodoId,
        /// New title
        title: String,
    },

    /// Delete a todo
    RemoveItem {
        /// Todo to delete
        id: TodoId,
    },

    /// Flip the completed flag of a todo
    ToggleItem {
        /// Todo to toggle
        id: TodoId,
    },

    /// Delete every todo
    RemoveAllItems,

    /// Set every todo's completed flag to the same value
    ToggleAll {
        /// Value to apply
        completed: bool,
    },

    /// Delete completed todos
    RemoveCompletedItems,
}

impl TodoAction {
    /// Wire names of every action kind
    pub const KINDS: [&'static str; 7] = [
        "ADD_ITEM",
        "UPDATE_ITEM",
        "REMOVE_ITEM",
        "TOGGLE_ITEM",
        "REMOVE_ALL_ITEMS",
        "TOGGLE_ALL",
        "REMOVE_COMPLETED_ITEMS",
    ];

    const UNIT_KINDS: [&'static str; 2] = ["REMOVE_ALL_ITEMS", "REMOVE_COMPLETED_ITEMS"];

    /// `AddItem` shorthand
    #[must_use]
    pub fn add(title: impl Into<String>) -> Self {
        Self::AddItem {
            title: title.into(),
        }
    }

    /// `UpdateItem` shorthand
    #[must_use]
    pub fn update(id: TodoId, title: impl Into<String>) -> Self {
        Self::UpdateItem {
            id,
            title: title.into(),
        }
    }

    /// `RemoveItem` shorthand
    #[must_use]
    pub const fn remove(id: TodoId) -> Self {
        Self::RemoveItem { id }
    }

    /// `ToggleItem` shorthand
    #[must_use]
    pub const fn toggle(id: TodoId) -> Self {
        Self::ToggleItem { id }
    }

    /// `ToggleAll` shorthand
    #[must_use]
    pub const fn toggle_all(completed: bool) -> Self {
        Self::ToggleAll { completed }
    }

    /// Wire name of this action's kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddItem { .. } => "ADD_ITEM",
            Self::UpdateItem { .. } => "UPDATE_ITEM",
            Self::RemoveItem { .. } => "REMOVE_ITEM",
            Self::ToggleItem { .. } => "TOGGLE_ITEM",
            Self::RemoveAllItems => "REMOVE_ALL_ITEMS",
            Self::ToggleAll { .. } => "TOGGLE_ALL",
            Self::RemoveCompletedItems => "REMOVE_COMPLETED_ITEMS",
        }
    }

    /// Parse an action from its JSON form
    ///
    /// # Errors
    ///
    /// - [`TodoError::UnknownAction`] if `type` names no known kind
    /// - [`TodoError::MissingActionType`] if there is no string `type` field
    /// - [`TodoError::InvalidAction`] if the JSON or the payload is malformed
    ///
    /// Kinds without a payload ignore one if it is present.
    pub fn from_json(raw: &str) -> Result<Self, TodoError> {
        let mut value: serde_json::Value =
            serde_json::from_str(raw).map_err(TodoError::InvalidAction)?;

        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or(TodoError::MissingActionType)?;
        if !Self::KINDS.contains(&kind) {
            return Err(TodoError::UnknownAction(kind.to_string()));
        }

        if Self::UNIT_KINDS.contains(&kind) {
            if let Some(fields) = value.as_object_mut() {
                fields.remove("payload");
            }
        }

        serde_json::from_value(value).map_err(TodoError::InvalidAction)
    }
}

impl FromStr for TodoAction {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: &str, title: &str, completed: bool) -> Todo {
        Todo {
            id: TodoId::from(id),
            title: title.to_string(),
            completed,
        }
    }

    #[test]
    fn todo_new_is_active() {
        let item = Todo::new(TodoId::from("abc"), "buy some cheese");
        assert_eq!(item.id.as_str(), "abc");
        assert_eq!(item.title, "buy some cheese");
        assert!(!item.completed);
    }

    #[test]
    fn todo_serializes_like_local_storage_records() {
        let json = serde_json::to_value(todo("abc", "feed the cat", true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "abc", "title": "feed the cat", "completed": true})
        );
    }

    #[test]
    fn state_serializes_as_array() {
        let state = TodoState::from(vec![todo("1", "a", false)]);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"[{"id":"1","title":"a","completed":false}]"#);
        let back: TodoState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn state_counts_and_counter_text() {
        let mut state = TodoState::new();
        assert_eq!(state.counter_text(), "0 items left");
        assert!(!state.all_completed());

        state.todos.push(todo("1", "buy some cheese", false));
        assert_eq!(state.counter_text(), "1 item left");

        state.todos.push(todo("2", "feed the cat", true));
        state.todos.push(todo("3", "book a doctors appointment", false));
        assert_eq!(state.len(), 3);
        assert_eq!(state.active_count(), 2);
        assert_eq!(state.completed_count(), 1);
        assert_eq!(state.counter_text(), "2 items left");
        assert!(!state.all_completed());
        assert_eq!(state.get(&TodoId::from("2")).map(|t| t.title.as_str()), Some("feed the cat"));
        assert!(state.get(&TodoId::from("4")).is_none());
    }

    #[test]
    fn visible_respects_filter_and_order() {
        let state = TodoState::from(vec![
            todo("1", "a", true),
            todo("2", "b", false),
            todo("3", "c", true),
        ]);

        let titles = |filter| state.visible(filter).map(|t| t.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(Filter::All), ["a", "b", "c"]);
        assert_eq!(titles(Filter::Active), ["b"]);
        assert_eq!(titles(Filter::Completed), ["a", "c"]);
    }

    #[test]
    fn filter_parses_names_and_routes() {
        assert_eq!("all".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!("#/".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!("#/active".parse::<Filter>().unwrap(), Filter::Active);
        assert_eq!("completed".parse::<Filter>().unwrap(), Filter::Completed);
        for filter in [Filter::All, Filter::Active, Filter::Completed] {
            assert_eq!(filter.route().parse::<Filter>().unwrap(), filter);
        }
        assert!(matches!(
            "#/archived".parse::<Filter>(),
            Err(TodoError::UnknownFilter(route)) if route == "#/archived"
        ));
    }

    #[test]
    fn action_wire_format() {
        let json = serde_json::to_value(TodoAction::add("buy some cheese")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "ADD_ITEM", "payload": {"title": "buy some cheese"}})
        );

        let json = serde_json::to_value(TodoAction::toggle_all(true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "TOGGLE_ALL", "payload": {"completed": true}})
        );
    }

    #[test]
    fn from_json_accepts_every_kind() {
        let cases = [
            (r#"{"type":"ADD_ITEM","payload":{"title":"a"}}"#, TodoAction::add("a")),
            (
                r#"{"type":"UPDATE_ITEM","payload":{"id":"x","title":"b"}}"#,
                TodoAction::update(TodoId::from("x"), "b"),
            ),
            (r#"{"type":"REMOVE_ITEM","payload":{"id":"x"}}"#, TodoAction::remove(TodoId::from("x"))),
            (r#"{"type":"TOGGLE_ITEM","payload":{"id":"x"}}"#, TodoAction::toggle(TodoId::from("x"))),
            (r#"{"type":"REMOVE_ALL_ITEMS"}"#, TodoAction::RemoveAllItems),
            (r#"{"type":"TOGGLE_ALL","payload":{"completed":false}}"#, TodoAction::toggle_all(false)),
            (r#"{"type":"REMOVE_COMPLETED_ITEMS"}"#, TodoAction::RemoveCompletedItems),
            (r#"{"type":"REMOVE_ALL_ITEMS","payload":{}}"#, TodoAction::RemoveAllItems),
            (r#"{"type":"REMOVE_ALL_ITEMS","payload":null}"#, TodoAction::RemoveAllItems),
            (
                r#"{"type":"REMOVE_COMPLETED_ITEMS","payload":{"ignored":true}}"#,
                TodoAction::RemoveCompletedItems,
            ),
        ];

        for (raw, expected) in cases {
            let parsed: TodoAction = raw.parse().unwrap();
            assert_eq!(parsed, expected);
            assert!(TodoAction::KINDS.contains(&parsed.kind()));
        }
    }

    #[test]
    fn from_json_rejects_unknown_kind() {
        let err = TodoAction::from_json(r#"{"type":"ARCHIVE_ITEM","payload":{"id":"x"}}"#).unwrap_err();
        assert!(matches!(err, TodoError::UnknownAction(kind) if kind == "ARCHIVE_ITEM"));
        assert_eq!(
            TodoError::UnknownAction("ARCHIVE_ITEM".to_string()).to_string(),
            "Unknown action: ARCHIVE_ITEM"
        );
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        assert!(matches!(
            TodoAction::from_json(r#"{"payload":{"title":"a"}}"#),
            Err(TodoError::MissingActionType)
        ));
        assert!(matches!(
            TodoAction::from_json(r#"{"type":"ADD_ITEM","payload":{}}"#),
            Err(TodoError::InvalidAction(_))
        ));
        assert!(matches!(
            TodoAction::from_json("not json"),
            Err(TodoError::InvalidAction(_))
        ));
    }
}
