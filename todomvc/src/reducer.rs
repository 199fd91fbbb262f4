//! Reducer logic for the todo list.
//!
//! [`transition`] is the pure core: it borrows the current list and builds
//! the next one, along with the shadow index update the change calls for.
//! [`TodoReducer`] wraps it for the store, turning the shadow update and the
//! snapshot write into effects.

use crate::shadow::{ShadowIndex, ShadowOp};
use crate::snapshot::SnapshotStore;
use crate::types::{Todo, TodoAction, TodoId, TodoState};
use std::sync::Arc;
use todomvc_core::{SmallVec, effect::Effect, environment::IdGenerator, reducer::Reducer};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of identifiers for new todos
    pub ids: Arc<dyn IdGenerator>,
    /// Best-effort title index updated by effects
    pub shadow: Arc<ShadowIndex>,
    /// Whole-list persistence, if enabled
    pub snapshots: Option<Arc<SnapshotStore>>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment` without snapshot persistence
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>, shadow: Arc<ShadowIndex>) -> Self {
        Self {
            ids,
            shadow,
            snapshots: None,
        }
    }

    /// Persist the whole list after every change
    #[must_use]
    pub fn with_snapshots(mut self, snapshots: Arc<SnapshotStore>) -> Self {
        self.snapshots = Some(snapshots);
        self
    }
}

/// Result of applying one action to a list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The next list
    pub todos: Vec<Todo>,
    /// Shadow index update to perform, if any
    pub shadow: Option<ShadowOp>,
}

impl Transition {
    const fn quiet(todos: Vec<Todo>) -> Self {
        Self {
            todos,
            shadow: None,
        }
    }
}

/// Compute the list that follows `todos` under `action`
///
/// The input is never modified. Actions addressing an id that is not in the
/// list leave the list as it was.
#[must_use]
pub fn transition(todos: &[Todo], action: TodoAction, ids: &dyn IdGenerator) -> Transition {
    match action {
        TodoAction::AddItem { title } => {
            let mut next = todos.to_vec();
            next.push(Todo::new(TodoId::new(ids.next_id()), title.clone()));
            Transition {
                todos: next,
                shadow: Some(ShadowOp::RecordTitle(title)),
            }
        },

        TodoAction::UpdateItem { id, title } => Transition::quiet(map_matching(todos, &id, |todo| {
            todo.title.clone_from(&title);
        })),

        TodoAction::RemoveItem { id } => {
            let shadow = todos
                .iter()
                .find(|todo| todo.id == id)
                .map(|todo| ShadowOp::RemoveTitle(todo.title.clone()));
            Transition {
                todos: todos.iter().filter(|todo| todo.id != id).cloned().collect(),
                shadow,
            }
        },

        TodoAction::ToggleItem { id } => Transition::quiet(map_matching(todos, &id, |todo| {
            todo.completed = !todo.completed;
        })),

        TodoAction::RemoveAllItems => Transition {
            todos: Vec::new(),
            shadow: Some(ShadowOp::Clear),
        },

        TodoAction::ToggleAll { completed } => Transition::quiet(
            todos
                .iter()
                .map(|todo| Todo {
                    completed,
                    ..todo.clone()
                })
                .collect(),
        ),

        TodoAction::RemoveCompletedItems => {
            let titles: Vec<String> = todos
                .iter()
                .filter(|todo| todo.completed)
                .map(|todo| todo.title.clone())
                .collect();
            Transition {
                todos: todos.iter().filter(|todo| !todo.completed).cloned().collect(),
                shadow: (!titles.is_empty()).then_some(ShadowOp::RemoveTitles(titles)),
            }
        },
    }
}

fn map_matching(todos: &[Todo], id: &TodoId, edit: impl Fn(&mut Todo)) -> Vec<Todo> {
    todos
        .iter()
        .map(|todo| {
            let mut next = todo.clone();
            if &next.id == id {
                edit(&mut next);
            }
            next
        })
        .collect()
}

/// Reducer for the todo list
#[derive(Clone, Copy, Debug)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TodoReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let kind = action.kind();
        let Transition { todos, shadow } = transition(&state.todos, action, env.ids.as_ref());
        let changed = todos != state.todos;
        state.todos = todos;

        tracing::debug!(action = kind, items = state.todos.len(), changed, "Reduced todo action");

        let mut effects = SmallVec::new();

        if let Some(op) = shadow {
            let index = Arc::clone(&env.shadow);
            effects.push(Effect::run(op.effect_name(), move || {
                index.apply(op);
                None
            }));
        }

        if let (true, Some(snapshots)) = (changed, &env.snapshots) {
            let snapshots = Arc::clone(snapshots);
            let todos = state.todos.clone();
            effects.push(Effect::run("snapshot.save", move || {
                snapshots.save(&todos);
                None
            }));
        }

        effects
    }
}
