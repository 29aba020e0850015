//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers in various ways:
//! - **`combine_reducers`**: One reducer per key of a map-shaped state
//! - **`scope_reducer`**: Focus a reducer on one slice of a larger state
//! - **`reducer_fn`**: Use a closure as a reducer
//!
//! Heterogeneous struct states are combined with the
//! [`struct_reducer!`](crate::struct_reducer!) macro instead.
//!
//! # Examples
//!
//! ## Combining Reducers
//!
//! ```
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//! use unistore_core::{Reducer, combine_reducers, reducer_fn, state};
//!
//! let add = reducer_fn(|state: Option<&Arc<i32>>, delta: &i32| {
//!     Arc::new(*state::current_or_default(state) + delta)
//! });
//! let keep = reducer_fn(|state: Option<&Arc<i32>>, _: &i32| state::current_or_default(state));
//!
//! let mut reducers: BTreeMap<&str, Box<dyn Reducer<State = i32, Action = i32>>> = BTreeMap::new();
//! reducers.insert("a", Box::new(add));
//! reducers.insert("b", Box::new(keep));
//! let combined = combine_reducers(reducers);
//!
//! let state = combined.reduce(None, &5);
//! assert_eq!(*state["a"], 5);
//! assert_eq!(*state["b"], 0);
//! ```

use crate::reducer::Reducer;
use crate::state;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// Boxed reducer over one slice of a keyed state.
pub type SliceReducer<V, A> = Box<dyn Reducer<State = V, Action = A>>;

/// Combines per-key reducers into one reducer over a keyed state.
///
/// The combined state is a `BTreeMap<K, Arc<V>>`. For every key in the
/// mapping, the next state holds `reducers[key](state.get(key), action)`,
/// independent of every other key. Keys of the previous state that have no
/// reducer are dropped. Every action reaches every sub-reducer.
///
/// When every slice comes back pointer-identical and the previous state has
/// exactly the mapping's keys, the previous `Arc` itself is returned.
///
/// # Type Parameters
///
/// - `K`: The key type
/// - `V`: The slice state type
/// - `A`: The action type
#[must_use]
pub fn combine_reducers<K, V, A>(reducers: BTreeMap<K, SliceReducer<V, A>>) -> CombinedReducer<K, V, A>
where
    K: Ord + Clone,
{
    CombinedReducer { reducers }
}

/// A reducer over a keyed state, one sub-reducer per key.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<K, V, A> {
    reducers: BTreeMap<K, SliceReducer<V, A>>,
}

impl<K, V, A> CombinedReducer<K, V, A> {
    /// Keys this reducer produces, in order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.reducers.keys()
    }
}

impl<K, V, A> Reducer for CombinedReducer<K, V, A>
where
    K: Ord + Clone,
{
    type State = BTreeMap<K, Arc<V>>;
    type Action = A;

    fn reduce(&self, state: Option<&Arc<Self::State>>, action: &Self::Action) -> Arc<Self::State> {
        let mut changed = state.is_none_or(|previous| previous.len() != self.reducers.len());

        let next: BTreeMap<K, Arc<V>> = self
            .reducers
            .iter()
            .map(|(key, reducer)| {
                let previous = state.and_then(|previous| previous.get(key));
                let slice = reducer.reduce(previous, action);
                changed |= state::changed(previous, &slice);
                (key.clone(), slice)
            })
            .collect();

        match state {
            Some(previous) if !changed => Arc::clone(previous),
            _ => Arc::new(next),
        }
    }
}

/// Scopes a reducer to operate on one slice of a larger state.
///
/// The parent state holds the slice as an `Arc<C>`. Without a previous parent
/// the scoped reducer starts from `P::default()`. When the child reducer
/// returns its slice unchanged, the parent `Arc` is returned unchanged too.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use unistore_core::{Reducer, reducer_fn, scope_reducer, state};
///
/// #[derive(Clone, Default)]
/// struct AppState {
///     clicks: Arc<u32>,
///     title: Arc<String>,
/// }
///
/// let clicks = reducer_fn(|state: Option<&Arc<u32>>, _: &()| {
///     Arc::new(*state::current_or_default(state) + 1)
/// });
///
/// let scoped = scope_reducer(
///     clicks,
///     |app: &AppState| &app.clicks,
///     |app: &mut AppState, clicks| app.clicks = clicks,
/// );
///
/// let state = scoped.reduce(None, &());
/// assert_eq!(*state.clicks, 1);
/// assert!(state.title.is_empty());
/// ```
pub fn scope_reducer<P, C, R>(
    reducer: R,
    get_state: fn(&P) -> &Arc<C>,
    set_state: fn(&mut P, Arc<C>),
) -> ScopedReducer<P, C, R>
where
    P: Clone + Default,
    R: Reducer<State = C>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
    }
}

/// A scoped reducer that operates on a slice of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<P, C, R> {
    reducer: R,
    get_state: fn(&P) -> &Arc<C>,
    set_state: fn(&mut P, Arc<C>),
}

impl<P, C, R> Reducer for ScopedReducer<P, C, R>
where
    P: Clone + Default,
    R: Reducer<State = C>,
{
    type State = P;
    type Action = R::Action;

    fn reduce(&self, state: Option<&Arc<Self::State>>, action: &Self::Action) -> Arc<Self::State> {
        let parent = state::current_or_default(state);
        let slice = (self.get_state)(&*parent);
        let next = self.reducer.reduce(Some(slice), action);

        if Arc::ptr_eq(slice, &next) {
            return parent;
        }

        let mut updated = (*parent).clone();
        (self.set_state)(&mut updated, next);
        Arc::new(updated)
    }
}

/// Wraps a closure as a [`Reducer`].
///
/// The closure receives the previous state (if any) and the action, and must
/// follow the same contract as [`Reducer::reduce`].
pub fn reducer_fn<S, A, F>(f: F) -> FnReducer<S, A, F>
where
    F: Fn(Option<&Arc<S>>, &A) -> Arc<S>,
{
    FnReducer {
        f,
        _phantom: PhantomData,
    }
}

/// A closure-backed reducer.
///
/// Created by [`reducer_fn`].
pub struct FnReducer<S, A, F> {
    f: F,
    _phantom: PhantomData<fn(&S, &A)>,
}

impl<S, A, F> Reducer for FnReducer<S, A, F>
where
    F: Fn(Option<&Arc<S>>, &A) -> Arc<S>,
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: Option<&Arc<S>>, action: &A) -> Arc<S> {
        (self.f)(state, action)
    }
}
