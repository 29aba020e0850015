//! # Unistore Runtime
//!
//! Runtime implementation for the unistore state container.
//!
//! This crate provides the [`Store`]: a single cell of application state,
//! driven entirely by a pure reducer and observable through subscriptions.
//!
//! ## Core Components
//!
//! - **Store**: Holds the current `Arc<State>`, applies the reducer on dispatch
//! - **Subscription**: Handle for removing a listener, idempotently
//! - **`SubscriptionGuard`**: Scoped listener, removed on drop
//! - **`StoreConfig`**: Label and re-entrancy policy
//!
//! ## Execution Model
//!
//! Single-threaded and synchronous. `dispatch` runs the reducer, commits the
//! new state, then calls every listener that was registered when the
//! notification pass began, in registration order, before returning. The
//! store is `!Sync`; a multi-threaded host wraps it in its own lock.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use unistore_core::{Action, Reducer, state};
//! use unistore_runtime::Store;
//!
//! #[derive(Debug)]
//! enum Click {
//!     Press,
//!     Init,
//! }
//!
//! impl Action for Click {
//!     fn init() -> Self {
//!         Self::Init
//!     }
//!
//!     fn kind(&self) -> &'static str {
//!         match self {
//!             Self::Press => "press",
//!             Self::Init => "init",
//!         }
//!     }
//! }
//!
//! struct Clicks;
//!
//! impl Reducer for Clicks {
//!     type State = u32;
//!     type Action = Click;
//!
//!     fn reduce(&self, state: Option<&Arc<u32>>, action: &Click) -> Arc<u32> {
//!         let current = state::current_or_default(state);
//!         match action {
//!             Click::Press => Arc::new(*current + 1),
//!             Click::Init => current,
//!         }
//!     }
//! }
//!
//! # fn main() -> Result<(), unistore_runtime::StoreError> {
//! let store = Store::new(Clicks);
//! let subscription = store.subscribe(|| println!("state changed"));
//!
//! store.dispatch(Click::Press)?;
//! assert_eq!(*store.get_state(), 1);
//!
//! subscription.unsubscribe();
//! # Ok(())
//! # }
//! ```

use serde::Deserialize;
use std::time::Duration;

/// Metrics emitted by the store
pub mod metrics;

/// Listener registry and subscription handles
pub mod subscription;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// `dispatch` was called while another dispatch on the same store was
        /// still running (typically from inside a listener).
        ///
        /// Returned under [`ReentrancyPolicy::Reject`](crate::ReentrancyPolicy::Reject).
        /// The action was not applied and the state is unchanged.
        #[error("Re-entrant dispatch of `{action}` rejected: a dispatch is already in progress")]
        ReentrantDispatch {
            /// Kind of the rejected action
            action: &'static str,
        },

        /// The re-entrancy budget of the current dispatch is used up.
        ///
        /// Returned under [`ReentrancyPolicy::Queue`](crate::ReentrancyPolicy::Queue)
        /// once one outer dispatch has accepted `capacity` nested actions,
        /// whether or not earlier ones were already drained. The action was
        /// not queued.
        #[error("Re-entrant dispatch of `{action}` dropped: {capacity} actions already queued by this dispatch")]
        QueueFull {
            /// Kind of the dropped action
            action: &'static str,
            /// Configured queue capacity
            capacity: usize,
        },
    }
}

pub use error::StoreError;

/// What the store does with a `dispatch` issued while another is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReentrancyPolicy {
    /// Fail the nested call with [`StoreError::ReentrantDispatch`]
    #[default]
    Reject,

    /// Append the action to a FIFO queue and return `Ok(())` immediately.
    ///
    /// The outer dispatch drains the queue after its own notification pass;
    /// each queued action gets its own reduce and notify pass. One outer
    /// dispatch accepts at most `max_queued_actions` nested actions in total,
    /// so a listener that re-dispatches on every notification still
    /// terminates.
    Queue,
}

/// Configuration for Store behavior
///
/// # Example
///
/// ```
/// use unistore_runtime::{ReentrancyPolicy, StoreConfig};
///
/// let config = StoreConfig::default()
///     .with_label("todos")
///     .with_reentrancy(ReentrancyPolicy::Queue)
///     .with_max_queued_actions(64);
///
/// assert_eq!(config.label, "todos");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name used in tracing spans and as the `store` metrics label
    pub label: String,
    /// Handling of re-entrant dispatch
    pub reentrancy: ReentrancyPolicy,
    /// Maximum number of re-entrant actions one outer dispatch accepts (only used by [`ReentrancyPolicy::Queue`])
    pub max_queued_actions: usize,
    /// Reducer runs slower than this are logged at `warn`
    #[serde(with = "duration_millis")]
    pub slow_reducer_threshold: Duration,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    ///
    /// # Arguments
    ///
    /// - `label`: Name for logs and metrics
    /// - `reentrancy`: Policy for nested dispatch
    /// - `max_queued_actions`: Queue bound for [`ReentrancyPolicy::Queue`]
    #[must_use]
    pub fn new(label: impl Into<String>, reentrancy: ReentrancyPolicy, max_queued_actions: usize) -> Self {
        Self {
            label: label.into(),
            reentrancy,
            max_queued_actions,
            ..Self::default()
        }
    }

    /// Set the label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the re-entrancy policy
    #[must_use]
    pub const fn with_reentrancy(mut self, reentrancy: ReentrancyPolicy) -> Self {
        self.reentrancy = reentrancy;
        self
    }

    /// Set the queue bound
    #[must_use]
    pub const fn with_max_queued_actions(mut self, max: usize) -> Self {
        self.max_queued_actions = max;
        self
    }

    /// Set the slow reducer threshold
    #[must_use]
    pub const fn with_slow_reducer_threshold(mut self, threshold: Duration) -> Self {
        self.slow_reducer_threshold = threshold;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            label: "store".to_string(),
            reentrancy: ReentrancyPolicy::Reject,
            max_queued_actions: 1024,
            slow_reducer_threshold: Duration::from_millis(16),
        }
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Store module - The runtime for reducers
///
/// Holds the state cell, the listener registry and the re-entrancy queue.
pub mod store {
    use super::metrics::{
        DISPATCH_QUEUED, DISPATCH_REJECTED, DISPATCH_TOTAL, LISTENERS_NOTIFIED, REDUCER_DURATION,
    };
    use super::subscription::{ListenerRegistry, Subscription};
    use super::{ReentrancyPolicy, StoreConfig, StoreError};
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::time::Instant;
    use unistore_core::{Action, Reducer};

    /// The Store - owner of one application state
    ///
    /// The Store manages:
    /// 1. State (an `Arc` swapped on every transition, never mutated)
    /// 2. Reducer (update logic)
    /// 3. Listeners (notified synchronously after each dispatch)
    ///
    /// There is no global instance: construct one explicitly and hand it (or an
    /// `Rc` of it) to whatever needs to read, dispatch, or subscribe.
    ///
    /// # Type Parameters
    ///
    /// - `R`: Reducer implementation; its `State` and `Action` types are the
    ///   store's
    pub struct Store<R>
    where
        R: Reducer,
    {
        reducer: R,
        state: RefCell<Arc<R::State>>,
        listeners: Rc<RefCell<ListenerRegistry>>,
        dispatching: Cell<bool>,
        queue: RefCell<VecDeque<R::Action>>,
        accepted: Cell<usize>,
        config: StoreConfig,
    }

    impl<R> Store<R>
    where
        R: Reducer,
        R::Action: Action,
    {
        /// Create a store whose initial state is the reducer's default.
        ///
        /// The reducer runs once with no previous state and
        /// [`Action::init`], so [`get_state`](Self::get_state) is valid
        /// before the first real dispatch. No listener exists yet, so none is
        /// notified.
        #[must_use]
        pub fn new(reducer: R) -> Self {
            Self::with_config(reducer, None, StoreConfig::default())
        }

        /// Create a store seeded with `initial_state`.
        ///
        /// The reducer still runs once with [`Action::init`] over the seed.
        #[must_use]
        pub fn with_state(reducer: R, initial_state: R::State) -> Self {
            Self::with_config(reducer, Some(initial_state), StoreConfig::default())
        }

        /// Create a store with custom configuration
        ///
        /// # Arguments
        ///
        /// - `reducer`: The reducer implementation
        /// - `initial_state`: Optional seed; `None` uses the reducer's default
        /// - `config`: Label and re-entrancy behavior
        #[must_use]
        pub fn with_config(reducer: R, initial_state: Option<R::State>, config: StoreConfig) -> Self {
            let seed = initial_state.map(Arc::new);
            let state = reducer.reduce(seed.as_ref(), &R::Action::init());

            tracing::info!(
                store = %config.label,
                seeded = seed.is_some(),
                reentrancy = ?config.reentrancy,
                "Store created"
            );

            Self {
                reducer,
                state: RefCell::new(state),
                listeners: Rc::new(RefCell::new(ListenerRegistry::default())),
                dispatching: Cell::new(false),
                queue: RefCell::new(VecDeque::new()),
                accepted: Cell::new(0),
                config,
            }
        }

        /// The current state snapshot
        ///
        /// Cheap: clones the `Arc`. Treat the value as read-only; the next
        /// dispatch replaces the store's `Arc` rather than touching this one.
        #[must_use]
        pub fn get_state(&self) -> Arc<R::State> {
            Arc::clone(&self.state.borrow())
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&R::State) -> T,
        {
            let state = self.get_state();
            f(&state)
        }

        /// Configuration this store was built with
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Number of registered listeners
        #[must_use]
        pub fn listener_count(&self) -> usize {
            self.listeners.borrow().len()
        }

        /// True while a dispatch (reducer or listeners) is running
        #[must_use]
        pub fn is_dispatching(&self) -> bool {
            self.dispatching.get()
        }

        /// Register a listener called after every dispatch.
        ///
        /// A listener registered while a dispatch is notifying is first called
        /// on the next dispatch.
        pub fn subscribe<F>(&self, listener: F) -> Subscription
        where
            F: Fn() + 'static,
        {
            let id = self.listeners.borrow_mut().insert(Rc::new(listener));
            tracing::trace!(store = %self.config.label, listener = %id, "Listener added");
            Subscription::new(id, &self.listeners)
        }

        /// Apply an action and notify listeners
        ///
        /// Computes `reducer(current, action)`, commits the result, then
        /// calls every listener registered at that point in registration
        /// order. Returns after the last listener returns.
        ///
        /// A reducer panic propagates to the caller with the previous state
        /// still in place; the store remains usable.
        ///
        /// # Errors
        ///
        /// When called while another dispatch is in flight:
        /// - [`StoreError::ReentrantDispatch`] under [`ReentrancyPolicy::Reject`]
        /// - [`StoreError::QueueFull`] under [`ReentrancyPolicy::Queue`] once
        ///   the outer dispatch has accepted `max_queued_actions` nested actions
        #[tracing::instrument(
            level = "debug",
            name = "store_dispatch",
            skip(self, action),
            fields(store = %self.config.label, action = action.kind())
        )]
        pub fn dispatch(&self, action: R::Action) -> Result<(), StoreError> {
            if self.dispatching.get() {
                return self.defer(action);
            }

            let _guard = DispatchGuard::enter(&self.dispatching, &self.queue, &self.accepted);
            self.apply(&action);

            loop {
                let next = self.queue.borrow_mut().pop_front();
                let Some(queued) = next else {
                    break;
                };
                tracing::debug!(action = queued.kind(), "Processing queued action");
                self.apply(&queued);
            }

            Ok(())
        }

        fn defer(&self, action: R::Action) -> Result<(), StoreError> {
            let label = self.config.label.clone();
            match self.config.reentrancy {
                ReentrancyPolicy::Reject => {
                    tracing::warn!("Rejected re-entrant dispatch: a dispatch is already in progress");
                    metrics::counter!(DISPATCH_REJECTED, "store" => label).increment(1);
                    Err(StoreError::ReentrantDispatch {
                        action: action.kind(),
                    })
                }
                ReentrancyPolicy::Queue => {
                    let mut queue = self.queue.borrow_mut();
                    if self.accepted.get() >= self.config.max_queued_actions {
                        tracing::warn!(
                            capacity = self.config.max_queued_actions,
                            "Re-entrancy budget used up, dropping action"
                        );
                        return Err(StoreError::QueueFull {
                            action: action.kind(),
                            capacity: self.config.max_queued_actions,
                        });
                    }
                    queue.push_back(action);
                    self.accepted.set(self.accepted.get() + 1);
                    tracing::debug!(queued = queue.len(), "Queued re-entrant dispatch");
                    metrics::counter!(DISPATCH_QUEUED, "store" => label).increment(1);
                    Ok(())
                }
            }
        }

        fn apply(&self, action: &R::Action) {
            let label = self.config.label.clone();
            tracing::debug!("Processing action");
            metrics::counter!(DISPATCH_TOTAL, "store" => label.clone()).increment(1);

            let previous = self.get_state();
            let next = {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = Instant::now();
                let next = self.reducer.reduce(Some(&previous), action);
                let duration = start.elapsed();
                metrics::histogram!(REDUCER_DURATION, "store" => label.clone())
                    .record(duration.as_secs_f64());

                if duration > self.config.slow_reducer_threshold {
                    tracing::warn!(?duration, "Slow reducer");
                }
                next
            };

            let changed = !Arc::ptr_eq(&previous, &next);
            *self.state.borrow_mut() = next;
            tracing::trace!(changed, "Reducer completed");

            let listeners = self.listeners.borrow().snapshot();
            tracing::trace!("Notifying {} listeners", listeners.len());
            for listener in &listeners {
                listener();
            }

            let notified = u64::try_from(listeners.len()).unwrap_or(u64::MAX);
            metrics::counter!(LISTENERS_NOTIFIED, "store" => label).increment(notified);
        }
    }

    /// Marks the store as dispatching; clears the mark, the re-entrancy
    /// budget and any queued actions left behind by a panic on drop.
    struct DispatchGuard<'a, A> {
        dispatching: &'a Cell<bool>,
        queue: &'a RefCell<VecDeque<A>>,
        accepted: &'a Cell<usize>,
    }

    impl<'a, A> DispatchGuard<'a, A> {
        fn enter(dispatching: &'a Cell<bool>, queue: &'a RefCell<VecDeque<A>>, accepted: &'a Cell<usize>) -> Self {
            dispatching.set(true);
            accepted.set(0);
            Self {
                dispatching,
                queue,
                accepted,
            }
        }
    }

    impl<A> Drop for DispatchGuard<'_, A> {
        fn drop(&mut self) {
            self.dispatching.set(false);
            self.accepted.set(0);

            let Ok(mut queue) = self.queue.try_borrow_mut() else {
                return;
            };
            if !queue.is_empty() {
                tracing::warn!(
                    dropped = queue.len(),
                    "Discarding queued actions after an interrupted dispatch"
                );
                queue.clear();
            }
        }
    }
}

pub use store::Store;
pub use subscription::{Listener, ListenerId, Subscription, SubscriptionGuard};
