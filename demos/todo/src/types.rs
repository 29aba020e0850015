//! Domain types for the Todo demo.
//!
//! A todo list is an ordered list of items plus the filter deciding which of
//! them are shown. Items are shared as `Arc<Todo>` so toggling one item
//! leaves every other allocation in place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use unistore_core::Action;

/// A single todo item
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, assigned in increasing order
    pub id: u64,
    /// What needs doing
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl Todo {
    /// Creates a new, not yet completed todo
    #[must_use]
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// A copy with `completed` flipped
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Todos in insertion order
pub type TodoList = Vec<Arc<Todo>>;

/// Which todos are shown
///
/// Deserializing an unknown tag yields [`VisibilityFilter::ShowAll`], same as
/// [`VisibilityFilter::from_tag`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum VisibilityFilter {
    /// Every todo
    #[default]
    ShowAll,
    /// Todos not yet completed
    ShowActive,
    /// Completed todos
    ShowCompleted,
}

impl VisibilityFilter {
    /// Every filter, in footer order
    pub const ALL: [Self; 3] = [Self::ShowAll, Self::ShowActive, Self::ShowCompleted];

    /// Parse a filter tag. Unknown tags fall back to [`VisibilityFilter::ShowAll`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "SHOW_ACTIVE" => Self::ShowActive,
            "SHOW_COMPLETED" => Self::ShowCompleted,
            _ => Self::ShowAll,
        }
    }

    /// The wire tag of this filter
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::ShowAll => "SHOW_ALL",
            Self::ShowActive => "SHOW_ACTIVE",
            Self::ShowCompleted => "SHOW_COMPLETED",
        }
    }

    /// Human label used by the footer
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ShowAll => "All",
            Self::ShowActive => "Active",
            Self::ShowCompleted => "Completed",
        }
    }
}

impl From<String> for VisibilityFilter {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl fmt::Display for VisibilityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Whole application state
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TodoAppState {
    /// All todos in insertion order
    pub todos: Arc<TodoList>,
    /// Current filter
    pub visibility_filter: Arc<VisibilityFilter>,
}

/// Actions for the todo app
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    /// Append a new todo
    AddTodo {
        /// Identifier for the new todo
        id: u64,
        /// Its text
        text: String,
    },

    /// Flip `completed` on the todo with this id
    ToggleTodo {
        /// Todo to toggle
        id: u64,
    },

    /// Change which todos are shown
    SetVisibilityFilter {
        /// New filter
        filter: VisibilityFilter,
    },

    /// Anything else; every reducer passes it through
    Unknown,
}

impl TodoAction {
    /// `AddTodo` with the next id from `ids`
    pub fn add(ids: &mut TodoIdGenerator, text: impl Into<String>) -> Self {
        Self::AddTodo {
            id: ids.next_id(),
            text: text.into(),
        }
    }
}

impl Action for TodoAction {
    fn init() -> Self {
        Self::Unknown
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::AddTodo { .. } => "ADD_TODO",
            Self::ToggleTodo { .. } => "TOGGLE_TODO",
            Self::SetVisibilityFilter { .. } => "SET_VISIBILITY_FILTER",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Hands out todo ids, starting at 0
#[derive(Debug, Default)]
pub struct TodoIdGenerator {
    next: u64,
}

impl TodoIdGenerator {
    /// A generator starting at 0
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// The next unused id
    pub const fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_new() {
        let todo = Todo::new(3, "milk");
        assert_eq!(todo.id, 3);
        assert_eq!(todo.text, "milk");
        assert!(!todo.completed);
    }

    #[test]
    fn todo_toggled_is_a_copy() {
        let todo = Todo::new(1, "bread");
        let toggled = todo.toggled();
        assert!(toggled.completed);
        assert!(!todo.completed);
        assert!(!toggled.toggled().completed);
    }

    #[test]
    fn filter_tags() {
        for filter in VisibilityFilter::ALL {
            assert_eq!(VisibilityFilter::from_tag(filter.tag()), filter);
        }
        assert_eq!(VisibilityFilter::from_tag("SHOW_SOME"), VisibilityFilter::ShowAll);
        assert_eq!(VisibilityFilter::default(), VisibilityFilter::ShowAll);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn filter_serializes_as_tag() {
        let json = serde_json::to_string(&VisibilityFilter::ShowActive).unwrap();
        assert_eq!(json, "\"SHOW_ACTIVE\"");
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn filter_deserializes_unknown_tag_as_show_all() {
        let active: VisibilityFilter = serde_json::from_str("\"SHOW_ACTIVE\"").unwrap();
        assert_eq!(active, VisibilityFilter::ShowActive);

        let unknown: VisibilityFilter = serde_json::from_str("\"SHOW_BOGUS\"").unwrap();
        assert_eq!(unknown, VisibilityFilter::from_tag("SHOW_BOGUS"));
        assert_eq!(unknown, VisibilityFilter::ShowAll);
    }

    #[test]
    fn id_generator_is_monotonic() {
        let mut ids = TodoIdGenerator::new();
        let first = TodoAction::add(&mut ids, "a");
        let second = TodoAction::add(&mut ids, "b");

        assert_eq!(first, TodoAction::AddTodo { id: 0, text: "a".to_string() });
        assert_eq!(second, TodoAction::AddTodo { id: 1, text: "b".to_string() });
    }

    #[test]
    fn action_kinds() {
        assert_eq!(TodoAction::init().kind(), "UNKNOWN");
        assert_eq!(TodoAction::ToggleTodo { id: 0 }.kind(), "TOGGLE_TODO");
    }
}
