//! # Unistore Testing
//!
//! Testing utilities and helpers for the unistore state container.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`assertions`]: identity / change assertions on transitions
//! - [`ListenerProbe`] and [`StateHistory`]: observe what a store notifies
//! - [`properties`]: proptest helpers for reducer contracts
//!
//! ## Example
//!
//! ```ignore
//! use unistore_testing::{ListenerProbe, init_test_tracing};
//! use unistore_runtime::Store;
//!
//! #[test]
//! fn notifies_once_per_dispatch() {
//!     init_test_tracing();
//!     let store = Store::new(CounterReducer);
//!     let probe = ListenerProbe::new();
//!     let _subscription = store.subscribe(probe.listener());
//!
//!     store.dispatch(CounterAction::Increment).unwrap();
//!     assert_eq!(probe.calls(), 1);
//! }
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;
use unistore_core::{Action, Reducer};
use unistore_runtime::{Store, Subscription};


pub use reducer_test::{ReducerTest, assertions};

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Honors `RUST_LOG`, defaulting to `debug`. Safe to call from every test;
/// only the first call installs anything.
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Counts listener invocations.
///
/// Clones share the same counter.
///
/// # Example
///
/// ```
/// use unistore_testing::ListenerProbe;
///
/// let probe = ListenerProbe::new();
/// let listener = probe.listener();
/// listener();
/// listener();
/// assert_eq!(probe.calls(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListenerProbe {
    calls: Rc<Cell<usize>>,
}

impl ListenerProbe {
    /// Create a probe with no recorded calls
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener closure that bumps this probe's counter
    pub fn listener(&self) -> impl Fn() + 'static {
        let calls = Rc::clone(&self.calls);
        move || calls.set(calls.get() + 1)
    }

    /// Number of calls recorded so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Forget recorded calls
    pub fn reset(&self) {
        self.calls.set(0);
    }
}

/// Records the store's state each time its listener fires.
///
/// Holds only a weak reference to the store, so it never keeps the store
/// alive.
pub struct StateHistory<S> {
    states: Rc<RefCell<Vec<Arc<S>>>>,
    subscription: Subscription,
}

impl<S: 'static> StateHistory<S> {
    /// Subscribe to `store` and start recording
    pub fn record<R>(store: &Rc<Store<R>>) -> Self
    where
        R: Reducer<State = S> + 'static,
        R::Action: Action,
    {
        let states = Rc::new(RefCell::new(Vec::new()));
        let weak: Weak<Store<R>> = Rc::downgrade(store);
        let sink = Rc::clone(&states);
        let subscription = store.subscribe(move || {
            if let Some(store) = weak.upgrade() {
                sink.borrow_mut().push(store.get_state());
            }
        });

        Self {
            states,
            subscription,
        }
    }

    /// States seen so far, oldest first
    #[must_use]
    pub fn states(&self) -> Vec<Arc<S>> {
        self.states.borrow().clone()
    }

    /// Number of notifications recorded
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.borrow().len()
    }

    /// True when nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.borrow().is_empty()
    }

    /// Stop recording
    pub fn stop(&self) {
        self.subscription.unsubscribe();
    }
}

/// Property-based testing utilities
///
/// Helpers returning `Result<(), TestCaseError>` so they compose inside
/// `proptest!` bodies with `?`.
pub mod properties {
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;
    use std::sync::Arc;
    use unistore_core::reducer::Reducer;

    /// The reducer returns `state` itself for `action`
    ///
    /// # Errors
    ///
    /// Fails the test case when a new allocation is returned.
    pub fn identity_holds<R>(reducer: &R, state: &Arc<R::State>, action: &R::Action) -> Result<(), TestCaseError>
    where
        R: Reducer,
        R::Action: std::fmt::Debug,
    {
        let next = reducer.reduce(Some(state), action);
        prop_assert!(
            Arc::ptr_eq(state, &next),
            "identity transition expected for {:?}",
            action
        );
        Ok(())
    }

    /// The reducer is deterministic: same input, equal output
    ///
    /// # Errors
    ///
    /// Fails the test case when two runs disagree.
    pub fn deterministic<R>(reducer: &R, state: Option<&Arc<R::State>>, action: &R::Action) -> Result<(), TestCaseError>
    where
        R: Reducer,
        R::State: PartialEq + std::fmt::Debug,
    {
        let first = reducer.reduce(state, action);
        let second = reducer.reduce(state, action);
        prop_assert_eq!(&*first, &*second);
        Ok(())
    }
}
