//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use todomvc_core::{effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// Effects are inspected by the `then_effects` assertions first and then,
/// if [`ReducerTest::executing_effects`] was requested, executed in order so
/// that assertions registered with `then_after_effects` can observe their
/// results (storage contents, counters).
///
/// # Example
///
/// ```ignore
/// use todomvc_testing::ReducerTest;
///
/// ReducerTest::new(TodoReducer::new())
///     .with_env(test_environment())
///     .given_state(TodoState::new())
///     .when_action(TodoAction::add("buy cheese"))
///     .then_state(|state| {
///         assert_eq!(state.len(), 1);
///     })
///     .then_effects(|effects| {
///         assert_eq!(effects.len(), 1);
///     })
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
    after_effects: Vec<Box<dyn FnOnce()>>,
    execute_effects: bool,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            action: None,
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
            after_effects: Vec::new(),
            execute_effects: false,
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Execute the returned effects after the effect assertions ran
    #[must_use]
    pub const fn executing_effects(mut self) -> Self {
        self.execute_effects = true;
        self
    }

    /// Add a check that runs once effects were executed
    ///
    /// Implies [`ReducerTest::executing_effects`].
    #[must_use]
    pub fn then_after_effects<F>(mut self, check: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        self.execute_effects = true;
        self.after_effects.push(Box::new(check));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        // Execute reducer
        let effects = self.reducer.reduce(&mut state, action, &env);

        // Run state assertions
        for assertion in self.state_assertions {
            assertion(&state);
        }

        // Run effect assertions
        for assertion in self.effect_assertions {
            assertion(&effects);
        }

        if self.execute_effects {
            run_effects(effects);
            for check in self.after_effects {
                check();
            }
        }
    }
}

/// Execute effects in order, returning the actions they fed back
///
/// Mirrors what the store runtime does, minus reducing the returned actions.
pub fn run_effects<A, I>(effects: I) -> Vec<A>
where
    I: IntoIterator<Item = Effect<A>>,
{
    let mut produced = Vec::new();
    for effect in effects {
        match effect {
            Effect::None => {},
            Effect::Run { task, .. } => produced.extend(task()),
        }
    }
    produced
}

/// Helper assertions for effects
pub mod assertions {
    use todomvc_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if any effect would do something when executed.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert the names of the `Run` effects, in execution order
    ///
    /// # Panics
    ///
    /// Panics if the names differ.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effect_names<A>(effects: &[Effect<A>], expected: &[&str]) {
        let names: Vec<&str> = effects.iter().filter_map(Effect::name).collect();
        assert_eq!(names, expected, "Unexpected effect names");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use todomvc_core::{SmallVec, smallvec};

    #[derive(Clone, Debug)]
    struct TestState {
        count: i32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Increment,
        Decrement,
        Ping,
        Pong,
    }

    struct TestReducer;

    struct TestEnv {
        pings: Arc<AtomicU32>,
    }

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.count += 1;
                    smallvec![Effect::None]
                },
                TestAction::Decrement => {
                    state.count -= 1;
                    smallvec![Effect::None]
                },
                TestAction::Ping => {
                    let pings = Arc::clone(&env.pings);
                    smallvec![Effect::run("ping", move || {
                        pings.fetch_add(1, Ordering::SeqCst);
                        Some(TestAction::Pong)
                    })]
                },
                TestAction::Pong => SmallVec::new(),
            }
        }
    }

    fn env() -> TestEnv {
        TestEnv {
            pings: Arc::new(AtomicU32::new(0)),
        }
    }

    #[test]
    fn test_reducer_test_increment() {
        ReducerTest::new(TestReducer)
            .with_env(env())
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Increment)
            .then_state(|state| {
                assert_eq!(state.count, 1);
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn test_reducer_test_decrement() {
        ReducerTest::new(TestReducer)
            .with_env(env())
            .given_state(TestState { count: 5 })
            .when_action(TestAction::Decrement)
            .then_state(|state| {
                assert_eq!(state.count, 4);
            })
            .run();
    }

    #[test]
    fn effects_are_not_executed_by_default() {
        let env = env();
        let pings = Arc::clone(&env.pings);

        ReducerTest::new(TestReducer)
            .with_env(env)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Ping)
            .then_effects(|effects| assertions::assert_effect_names(effects, &["ping"]))
            .run();

        assert_eq!(pings.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn after_effects_checks_see_executed_effects() {
        let env = env();
        let pings = Arc::clone(&env.pings);
        let checked = Rc::new(Cell::new(false));
        let seen = Rc::clone(&checked);

        ReducerTest::new(TestReducer)
            .with_env(env)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Ping)
            .then_after_effects(move || {
                assert_eq!(pings.load(Ordering::SeqCst), 1);
                seen.set(true);
            })
            .run();

        assert!(checked.get());
    }

    #[test]
    fn run_effects_collects_feedback() {
        let effects: Vec<Effect<TestAction>> = vec![
            Effect::None,
            Effect::run("a", || Some(TestAction::Ping)),
            Effect::run("b", || None),
            Effect::run("c", || Some(TestAction::Pong)),
        ];
        assert_eq!(run_effects(effects), vec![TestAction::Ping, TestAction::Pong]);
    }

    #[test]
    fn test_assertions_no_effects() {
        assertions::assert_no_effects::<TestAction>(&[Effect::None]);
        assertions::assert_no_effects::<TestAction>(&[]);
    }

    #[test]
    fn test_assertions_effects_count() {
        assertions::assert_effects_count(&[Effect::<TestAction>::None], 1);
        assertions::assert_effects_count::<TestAction>(&[], 0);
    }
}
