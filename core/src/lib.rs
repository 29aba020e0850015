//! # Unistore Core
//!
//! Core traits and types for the unistore state container.
//!
//! This crate provides the pure half of a unidirectional data-flow store:
//! the [`Reducer`] and [`Action`] traits plus utilities for composing small
//! reducers into a single application reducer. The runtime half (the `Store`
//! holding state and notifying listeners) lives in `unistore-runtime`.
//!
//! ## Core Concepts
//!
//! - **State**: Application-defined value, shared as `Arc<State>` and never mutated in place
//! - **Action**: Enum of everything that can happen, with a catch-all variant for pass-through
//! - **Reducer**: Pure function `(Option<State>, Action) → State`
//!
//! ## Transition Contract
//!
//! A reducer either returns the *same* `Arc` it was given (identity, checked
//! with [`Arc::ptr_eq`]) or a freshly allocated state. Actions a reducer does
//! not recognize must take the identity path. When called without a previous
//! state, a reducer returns its default state.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use unistore_core::{Action, Reducer, state};
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//!     Unknown,
//! }
//!
//! impl Action for CounterAction {
//!     fn init() -> Self {
//!         Self::Unknown
//!     }
//!
//!     fn kind(&self) -> &'static str {
//!         match self {
//!             Self::Increment => "increment",
//!             Self::Unknown => "unknown",
//!         }
//!     }
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = i64;
//!     type Action = CounterAction;
//!
//!     fn reduce(&self, state: Option<&Arc<i64>>, action: &CounterAction) -> Arc<i64> {
//!         let current = state::current_or_default(state);
//!         match action {
//!             CounterAction::Increment => Arc::new(*current + 1),
//!             CounterAction::Unknown => current,
//!         }
//!     }
//! }
//!
//! let initial = CounterReducer.reduce(None, &CounterAction::init());
//! assert_eq!(*initial, 0);
//!
//! let next = CounterReducer.reduce(Some(&initial), &CounterAction::Increment);
//! assert_eq!(*next, 1);
//! ```

use std::rc::Rc;
use std::sync::Arc;

/// Reducer composition utilities
pub mod composition;

/// Declarative macro for reducers over named structs
pub mod struct_reducer;

/// Action module - the input type for reducers
///
/// Actions are plain enums, one variant per recognized tag. Every action type
/// carries a catch-all variant so unknown input passes through reducers as an
/// identity transition.
pub mod action {
    /// Common behavior for every action type
    pub trait Action {
        /// The sentinel action a store dispatches once on creation.
        ///
        /// Every reducer must treat it as unrecognized, so the store's first
        /// state is whatever the reducer returns as its default.
        fn init() -> Self;

        /// Short tag naming this action, used for logging.
        fn kind(&self) -> &'static str;
    }
}

/// State module - helpers for immutable state transitions
///
/// State is shared as `Arc<S>`. These helpers cover the two things every
/// reducer does: pick up the previous state (or its default) and tell whether
/// a transition changed anything.
pub mod state {
    use std::sync::Arc;

    /// Returns the previous state, or builds the default when there is none.
    ///
    /// The returned `Arc` is a clone of the input, so returning it unchanged
    /// keeps pointer identity.
    #[must_use]
    pub fn current_or<S>(state: Option<&Arc<S>>, default: impl FnOnce() -> S) -> Arc<S> {
        state.map_or_else(|| Arc::new(default()), Arc::clone)
    }

    /// Same as [`current_or`] using `S::default()`.
    #[must_use]
    pub fn current_or_default<S: Default>(state: Option<&Arc<S>>) -> Arc<S> {
        current_or(state, S::default)
    }

    /// True when `next` is a different allocation than `previous`.
    ///
    /// A missing previous state always counts as changed.
    #[must_use]
    pub fn changed<S>(previous: Option<&Arc<S>>, next: &Arc<S>) -> bool {
        previous.is_none_or(|previous| !Arc::ptr_eq(previous, next))
    }
}

/// Reducer module - The core trait for application logic
///
/// Reducers are pure functions: `(Option<State>, Action) → State`
///
/// They contain all update logic and are deterministic and testable.
pub mod reducer {
    use std::sync::Arc;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer produces
    /// - `Action`: The action type this reducer processes
    ///
    /// # Contract
    ///
    /// - `state == None` returns the default state.
    /// - Unrecognized actions return the input `Arc` unchanged.
    /// - Recognized actions that change something return a new `Arc`; the
    ///   input is never mutated.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// Reduce an action into the next state
        ///
        /// # Arguments
        ///
        /// - `state`: The previous state, or `None` to request the default
        /// - `action`: The action to process
        ///
        /// # Returns
        ///
        /// The input `Arc` for an identity transition, a new one otherwise
        fn reduce(&self, state: Option<&Arc<Self::State>>, action: &Self::Action)
        -> Arc<Self::State>;
    }
}

pub use action::Action;
pub use composition::{CombinedReducer, FnReducer, ScopedReducer, combine_reducers, reducer_fn, scope_reducer};
pub use reducer::Reducer;

impl<R: Reducer + ?Sized> Reducer for Box<R> {
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: Option<&Arc<Self::State>>, action: &Self::Action) -> Arc<Self::State> {
        (**self).reduce(state, action)
    }
}

impl<R: Reducer + ?Sized> Reducer for Rc<R> {
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: Option<&Arc<Self::State>>, action: &Self::Action) -> Arc<Self::State> {
        (**self).reduce(state, action)
    }
}

impl<R: Reducer + ?Sized> Reducer for &R {
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: Option<&Arc<Self::State>>, action: &Self::Action) -> Arc<Self::State> {
        (**self).reduce(state, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Settings {
        volume: u8,
    }

    #[test]
    fn current_or_keeps_identity() {
        let previous = Arc::new(Settings { volume: 3 });
        let current = state::current_or_default(Some(&previous));
        assert!(Arc::ptr_eq(&previous, &current));
    }

    #[test]
    fn current_or_builds_default_without_previous() {
        let current = state::current_or(None, || Settings { volume: 7 });
        assert_eq!(current.volume, 7);
    }

    #[test]
    fn changed_compares_allocations_not_values() {
        let previous = Arc::new(Settings::default());
        let equal_but_new = Arc::new(Settings::default());

        assert!(!state::changed(Some(&previous), &Arc::clone(&previous)));
        assert!(state::changed(Some(&previous), &equal_but_new));
        assert!(state::changed(None, &previous));
    }
}
