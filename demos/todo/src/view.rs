//! Plain-text views over [`TodoAppState`].

use crate::reducer::visible_todos;
use crate::types::{Todo, TodoAppState, VisibilityFilter};

/// Whether the footer link for `filter` is the current one
#[must_use]
pub fn filter_link_active(state: &TodoAppState, filter: VisibilityFilter) -> bool {
    *state.visibility_filter == filter
}

/// One line per todo
#[must_use]
pub fn render_todo(todo: &Todo) -> String {
    let mark = if todo.completed { 'x' } else { ' ' };
    format!("[{mark}] {:>3}  {}", todo.id, todo.text)
}

/// The todos visible under the current filter, one per line
///
/// An empty filtered list renders as `(nothing to show)`.
#[must_use]
pub fn render_list(state: &TodoAppState) -> String {
    let visible = visible_todos(&state.todos, *state.visibility_filter);
    if visible.is_empty() {
        return "(nothing to show)".to_string();
    }

    visible
        .iter()
        .map(|todo| render_todo(todo))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `Show: All, Active, Completed` with the active link in brackets
#[must_use]
pub fn render_footer(state: &TodoAppState) -> String {
    let mut footer = String::from("Show: ");
    for (index, filter) in VisibilityFilter::ALL.into_iter().enumerate() {
        if index > 0 {
            footer.push_str(", ");
        }
        if filter_link_active(state, filter) {
            footer.push_str(&format!("[{}]", filter.label()));
        } else {
            footer.push_str(filter.label());
        }
    }
    footer
}

/// List followed by footer
#[must_use]
pub fn render(state: &TodoAppState) -> String {
    format!("{}\n{}", render_list(state), render_footer(state))
}
