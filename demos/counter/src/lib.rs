//! # Counter Demo
//!
//! A simple counter driven by a unistore [`Store`](unistore_runtime::Store).
//!
//! The counter is a pure state machine: an `i64` that `Increment` and
//! `Decrement` move by one. Every other action leaves it untouched.
//!
//! ## Example
//!
//! ```
//! use counter::{CounterAction, CounterReducer};
//! use unistore_runtime::Store;
//!
//! # fn main() -> Result<(), unistore_runtime::StoreError> {
//! let store = Store::new(CounterReducer);
//! assert_eq!(*store.get_state(), 0);
//!
//! store.dispatch(CounterAction::Increment)?;
//! store.dispatch(CounterAction::Increment)?;
//! store.dispatch(CounterAction::Decrement)?;
//! assert_eq!(*store.get_state(), 1);
//! # Ok(())
//! # }
//! ```

use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use unistore_core::{Action, Reducer, state};

/// Counter actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterAction {
    /// Increment the counter by 1
    Increment,
    /// Decrement the counter by 1
    Decrement,
    /// Any other tag; passes through unchanged
    Unknown,
}

impl CounterAction {
    /// Map an action tag to an action. Unrecognized tags become `Unknown`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "increment" => Self::Increment,
            "decrement" => Self::Decrement,
            _ => Self::Unknown,
        }
    }
}

impl Action for CounterAction {
    fn init() -> Self {
        Self::Unknown
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Unknown => "unknown",
        }
    }
}

/// Counter reducer
///
/// Starts at 0. Arithmetic wraps instead of overflowing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = i64;
    type Action = CounterAction;

    fn reduce(&self, state: Option<&Arc<i64>>, action: &CounterAction) -> Arc<i64> {
        let count = state::current_or_default(state);
        match action {
            CounterAction::Increment => Arc::new(count.wrapping_add(1)),
            CounterAction::Decrement => Arc::new(count.wrapping_sub(1)),
            CounterAction::Unknown => count,
        }
    }
}

/// A line of input to the counter binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Dispatch an action
    Dispatch(CounterAction),
    /// Leave the input loop
    Quit,
}

/// Input the counter binary does not understand
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Blank line
    #[error("empty command")]
    Empty,
    /// Anything else
    #[error("unknown command `{0}` (expected `+`, `-` or `quit`)")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line.trim() {
            "" => Err(CommandError::Empty),
            "+" | "increment" => Ok(Self::Dispatch(CounterAction::Increment)),
            "-" | "decrement" => Ok(Self::Dispatch(CounterAction::Decrement)),
            "q" | "quit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Text rendering of the counter widget
#[must_use]
pub fn render(count: i64) -> String {
    format!("[ - ]  {count}  [ + ]")
}
