//! Todo list demo for the unistore state container.
//!
//! State is split into two independently reduced slices, the todo list and
//! the visibility filter, combined with [`struct_reducer!`](unistore_core::struct_reducer).
//! Views are derived on read with [`visible_todos`].
//!
//! # Quick Start
//!
//! ```
//! use todo::{TodoAction, TodoApp, TodoIdGenerator, VisibilityFilter, visible_todos};
//! use unistore_runtime::Store;
//!
//! # fn main() -> Result<(), unistore_runtime::StoreError> {
//! let store = Store::new(TodoApp);
//! let mut ids = TodoIdGenerator::new();
//!
//! store.dispatch(TodoAction::add(&mut ids, "Buy milk"))?;
//! store.dispatch(TodoAction::add(&mut ids, "Walk the dog"))?;
//! store.dispatch(TodoAction::ToggleTodo { id: 0 })?;
//! store.dispatch(TodoAction::SetVisibilityFilter {
//!     filter: VisibilityFilter::ShowActive,
//! })?;
//!
//! let state = store.get_state();
//! let visible = visible_todos(&state.todos, *state.visibility_filter);
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].text, "Walk the dog");
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod reducer;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use command::{Command, CommandError};
pub use reducer::{TodoApp, TodoReducer, TodosReducer, VisibilityFilterReducer, visible_todos};
pub use types::{Todo, TodoAction, TodoAppState, TodoIdGenerator, TodoList, VisibilityFilter};
