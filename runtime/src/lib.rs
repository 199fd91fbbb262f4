//! # TodoMVC Runtime
//!
//! Runtime implementation for the TodoMVC reducer architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: Owns the state, runs the reducer, executes effects
//! - **Feedback loop**: Actions returned by effects go back through the reducer
//!   before `send` returns
//!
//! ## Example
//!
//! ```ignore
//! use todomvc_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use crate::metrics::StoreMetrics;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use todomvc_core::{effect::Effect, reducer::Reducer};
use tokio::sync::RwLock;

/// Counters for store activity
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Effects kept producing actions past the configured bound
        ///
        /// State changes made by actions processed before the limit was hit
        /// are kept.
        #[error("Effect feedback exceeded {0} actions")]
        FeedbackLimitExceeded(usize),
    }
}

pub use error::StoreError;

/// Configuration for Store behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of actions effects may feed back during one `send`
    pub max_feedback_depth: usize,
}

impl StoreConfig {
    /// Default bound on fed-back actions per `send`
    pub const DEFAULT_MAX_FEEDBACK_DEPTH: usize = 64;

    /// Set the feedback bound
    #[must_use]
    pub const fn with_max_feedback_depth(mut self, depth: usize) -> Self {
        self.max_feedback_depth = depth;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_feedback_depth: Self::DEFAULT_MAX_FEEDBACK_DEPTH,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        Arc, AtomicBool, Effect, Ordering, Reducer, RwLock, StoreConfig, StoreError,
        StoreMetrics, VecDeque,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// Effects run inline while the write lock is held, so concurrent
    /// `send()` calls are applied one at a time and every effect of an
    /// action has finished before the next action is reduced.
    ///
    /// Effects are synchronous. A blocking effect (file-backed storage, for
    /// instance) blocks the calling runtime worker and holds up every other
    /// `send()` and `state()` caller until it returns.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        config: StoreConfig,
        shutdown: Arc<AtomicBool>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                config,
                shutdown: Arc::new(AtomicBool::new(false)),
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Executes returned effects in order
        /// 4. Reduces any actions the effects produced, until none remain
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`] if the store is shutting down
        /// - [`StoreError::FeedbackLimitExceeded`] if effects fed back more
        ///   than `max_feedback_depth` actions
        ///
        /// # Panics
        ///
        /// If the reducer panics, the panic will propagate to the caller.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                StoreMetrics::record_rejected();
                tracing::warn!("Rejecting action: store is shutting down");
                return Err(StoreError::ShutdownInProgress);
            }

            let mut state = self.state.write().await;
            let mut pending = VecDeque::new();
            pending.push_back(action);
            let mut fed_back = 0usize;
            let mut first = true;

            while let Some(action) = pending.pop_front() {
                if !first {
                    fed_back += 1;
                    if fed_back > self.config.max_feedback_depth {
                        tracing::error!(
                            limit = self.config.max_feedback_depth,
                            "Effect feedback limit exceeded"
                        );
                        return Err(StoreError::FeedbackLimitExceeded(
                            self.config.max_feedback_depth,
                        ));
                    }
                }
                first = false;

                let effects = self.reducer.reduce(&mut state, action, &self.environment);
                StoreMetrics::record_action();

                for effect in effects {
                    execute(effect, &mut pending);
                }
            }

            Ok(())
        }

        /// Read current state via a closure
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Injected dependencies this store was built with
        #[must_use]
        pub fn environment(&self) -> &E {
            &self.environment
        }

        /// Stop accepting actions
        ///
        /// Effects never outlive `send`, so there is nothing left to drain.
        pub fn shutdown(&self) {
            tracing::info!("Store shutting down");
            self.shutdown.store(true, Ordering::Release);
        }

        /// Whether [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shutdown(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                config: self.config,
                shutdown: Arc::clone(&self.shutdown),
            }
        }
    }

    fn execute<A>(effect: Effect<A>, pending: &mut VecDeque<A>) {
        match effect {
            Effect::None => {},
            Effect::Run { name, task } => {
                tracing::trace!(effect = name, "Executing effect");
                StoreMetrics::record_effect(name);
                if let Some(action) = task() {
                    pending.push_back(action);
                }
            },
        }
    }
}

pub use store::Store;
