//! # TodoMVC Core
//!
//! Core traits and types for the TodoMVC reducer architecture.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature (the ordered todo list)
//! - **Action**: All possible inputs to a reducer
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions, executed by the runtime after the reducer returns
//! - **Environment**: Injected dependencies via traits (clock, id generator, storage)
//!
//! ## Example
//!
//! ```
//! use todomvc_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CountState {
//!     count: u32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CountAction {
//!     Bump,
//! }
//!
//! struct CountReducer;
//!
//! impl Reducer for CountReducer {
//!     type State = CountState;
//!     type Action = CountAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CountState,
//!         action: CountAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CountAction>; 4]> {
//!         match action {
//!             CountAction::Bump => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = CountState::default();
//! let effects = CountReducer.reduce(&mut state, CountAction::Bump, &());
//! assert_eq!(state.count, 1);
//! assert_eq!(effects.len(), 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

/// Key-value storage abstraction
pub mod storage;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// Actions are expected to be closed enums matched without a catch-all
    /// arm, so adding a variant breaks every reducer that forgot to handle it.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Computes the next state and stores it in `state`
        /// 2. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime, in order
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution): the reducer builds them, the store runs them.
pub mod effect {
    /// A deferred synchronous side effect.
    ///
    /// Returns `Some(action)` to feed an action back into the reducer.
    pub type Task<Action> = Box<dyn FnOnce() -> Option<Action> + Send>;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Named synchronous side effect (storage writes and the like)
        Run {
            /// Short label used in logs and test assertions
            name: &'static str,
            /// The work to perform
            task: Task<Action>,
        },
    }

    // Manual Debug implementation since closures don't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Run { name, .. } => write!(f, "Effect::Run({name})"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap a closure as a named effect
        #[must_use]
        pub fn run<F>(name: &'static str, task: F) -> Self
        where
            F: FnOnce() -> Option<Action> + Send + 'static,
        {
            Effect::Run {
                name,
                task: Box::new(task),
            }
        }

        /// Returns true if executing this effect does nothing
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// Label of a `Run` effect
        #[must_use]
        pub const fn name(&self) -> Option<&'static str> {
            match self {
                Effect::None => None,
                Effect::Run { name, .. } => Some(*name),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall clock backed by [`Utc::now`]
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of fresh identifiers for newly created records
    ///
    /// Identifiers are expected to be unique within a session but are not
    /// required to be collision-proof.
    pub trait IdGenerator: Send + Sync {
        /// Produce the next identifier
        fn next_id(&self) -> String;
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;

    #[derive(Debug)]
    enum Noop {}

    #[test]
    fn none_has_no_name() {
        let effect: Effect<Noop> = Effect::None;
        assert!(effect.is_none());
        assert_eq!(effect.name(), None);
        assert_eq!(format!("{effect:?}"), "Effect::None");
    }

    #[test]
    fn run_is_named() {
        let effect: Effect<Noop> = Effect::run("snapshot.save", || None);
        assert!(!effect.is_none());
        assert_eq!(effect.name(), Some("snapshot.save"));
        assert_eq!(format!("{effect:?}"), "Effect::Run(snapshot.save)");
    }
}
