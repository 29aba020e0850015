//! Declarative macro for reducers over named structs
//!
//! [`combine_reducers`](crate::combine_reducers) handles map-shaped state
//! where every slice has the same type. Application state is usually a struct
//! whose fields have different types; `struct_reducer!` generates the same
//! per-field combination for such a struct.

/// Generate a reducer for a struct whose fields each have their own reducer.
///
/// Every field of the state struct must be an `Arc<_>` and must be listed,
/// paired with an expression evaluating to that field's reducer. The
/// generated unit struct implements [`Reducer`](crate::Reducer):
///
/// - each field's next value is `field_reducer(previous.field, action)`,
///   independent of the other fields;
/// - without a previous state every field reducer gets `None` and supplies
///   its own default;
/// - when every field comes back pointer-identical, the previous `Arc` is
///   returned.
///
/// The state and action types must be at least as visible as the generated
/// reducer, since they appear as its associated types.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use unistore_core::{Reducer, reducer_fn, state, struct_reducer};
///
/// #[derive(Debug)]
/// struct Scoreboard {
///     home: Arc<u32>,
///     away: Arc<u32>,
/// }
///
/// #[derive(Debug)]
/// enum Goal {
///     Home,
///     Away,
/// }
///
/// fn home(state: Option<&Arc<u32>>, goal: &Goal) -> Arc<u32> {
///     let current = state::current_or_default(state);
///     match goal {
///         Goal::Home => Arc::new(*current + 1),
///         Goal::Away => current,
///     }
/// }
///
/// fn away(state: Option<&Arc<u32>>, goal: &Goal) -> Arc<u32> {
///     let current = state::current_or_default(state);
///     match goal {
///         Goal::Away => Arc::new(*current + 1),
///         Goal::Home => current,
///     }
/// }
///
/// struct_reducer! {
///     /// Scores both teams.
///     struct ScoreboardReducer(Scoreboard, Goal) {
///         home: reducer_fn(home),
///         away: reducer_fn(away),
///     }
/// }
///
/// let state = ScoreboardReducer.reduce(None, &Goal::Home);
/// assert_eq!((*state.home, *state.away), (1, 0));
///
/// let next = ScoreboardReducer.reduce(Some(&state), &Goal::Away);
/// assert!(Arc::ptr_eq(&state.home, &next.home));
/// assert_eq!(*next.away, 1);
/// ```
#[macro_export]
macro_rules! struct_reducer {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident ($state:ident, $action:ty) {
            $($field:ident : $reducer:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $name;

        impl $crate::reducer::Reducer for $name {
            type State = $state;
            type Action = $action;

            fn reduce(
                &self,
                state: ::std::option::Option<&::std::sync::Arc<$state>>,
                action: &$action,
            ) -> ::std::sync::Arc<$state> {
                let mut changed = false;
                $(
                    let previous = state.map(|previous| &previous.$field);
                    let $field = $crate::reducer::Reducer::reduce(&$reducer, previous, action);
                    changed |= $crate::state::changed(previous, &$field);
                )+

                match state {
                    ::std::option::Option::Some(previous) if !changed => {
                        ::std::sync::Arc::clone(previous)
                    }
                    _ => ::std::sync::Arc::new($state { $($field),+ }),
                }
            }
        }
    };
}
