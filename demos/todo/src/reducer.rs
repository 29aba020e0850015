//! Reducer logic for the Todo app.
//!
//! Three small reducers, one per concern, combined into [`TodoApp`]:
//! - [`TodoReducer`]: one item
//! - [`TodosReducer`]: the list, delegating to the item reducer
//! - [`VisibilityFilterReducer`]: the filter

use crate::types::{Todo, TodoAction, TodoAppState, TodoList, VisibilityFilter};
use std::sync::Arc;
use unistore_core::{Reducer, state, struct_reducer};

/// Reducer for a single todo item
///
/// `AddTodo` builds a fresh item regardless of the previous state.
/// `ToggleTodo` only touches an existing item whose id matches; without a
/// previous item it yields the empty default.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl Reducer for TodoReducer {
    type State = Todo;
    type Action = TodoAction;

    fn reduce(&self, state: Option<&Arc<Todo>>, action: &TodoAction) -> Arc<Todo> {
        match action {
            TodoAction::AddTodo { id, text } => Arc::new(Todo::new(*id, text.clone())),
            TodoAction::ToggleTodo { id } => match state {
                Some(todo) if todo.id == *id => Arc::new(todo.toggled()),
                _ => state::current_or_default(state),
            },
            TodoAction::SetVisibilityFilter { .. } | TodoAction::Unknown => {
                state::current_or_default(state)
            }
        }
    }
}

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodosReducer;

impl Reducer for TodosReducer {
    type State = TodoList;
    type Action = TodoAction;

    fn reduce(&self, state: Option<&Arc<TodoList>>, action: &TodoAction) -> Arc<TodoList> {
        let todos = state::current_or_default(state);
        match action {
            TodoAction::AddTodo { .. } => {
                let mut next = Vec::with_capacity(todos.len() + 1);
                next.extend(todos.iter().cloned());
                next.push(TodoReducer.reduce(None, action));
                Arc::new(next)
            }
            TodoAction::ToggleTodo { .. } => {
                let next: TodoList = todos
                    .iter()
                    .map(|todo| TodoReducer.reduce(Some(todo), action))
                    .collect();

                let changed = todos
                    .iter()
                    .zip(&next)
                    .any(|(before, after)| !Arc::ptr_eq(before, after));

                if changed { Arc::new(next) } else { todos }
            }
            TodoAction::SetVisibilityFilter { .. } | TodoAction::Unknown => todos,
        }
    }
}

/// Reducer for the visibility filter, `ShowAll` by default
#[derive(Clone, Copy, Debug, Default)]
pub struct VisibilityFilterReducer;

impl Reducer for VisibilityFilterReducer {
    type State = VisibilityFilter;
    type Action = TodoAction;

    fn reduce(&self, state: Option<&Arc<VisibilityFilter>>, action: &TodoAction) -> Arc<VisibilityFilter> {
        let current = state::current_or_default(state);
        match action {
            TodoAction::SetVisibilityFilter { filter } if *filter != *current => Arc::new(*filter),
            _ => current,
        }
    }
}

struct_reducer! {
    /// The whole todo app: list and filter, each driven by its own reducer
    pub struct TodoApp(TodoAppState, TodoAction) {
        todos: TodosReducer,
        visibility_filter: VisibilityFilterReducer,
    }
}

/// Todos that pass `filter`, in list order
#[must_use]
pub fn visible_todos(todos: &[Arc<Todo>], filter: VisibilityFilter) -> Vec<Arc<Todo>> {
    todos
        .iter()
        .filter(|todo| match filter {
            VisibilityFilter::ShowAll => true,
            VisibilityFilter::ShowActive => !todo.completed,
            VisibilityFilter::ShowCompleted => todo.completed,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use unistore_core::Action;
    use unistore_testing::{ReducerTest, assertions};

    fn list(todos: &[Todo]) -> Arc<TodoList> {
        Arc::new(todos.iter().cloned().map(Arc::new).collect())
    }

    #[test]
    fn test_item_add_ignores_previous_state() {
        ReducerTest::new(TodoReducer)
            .given_state(Todo::new(7, "old"))
            .when_action(TodoAction::AddTodo { id: 0, text: "new".to_string() })
            .then_state(|todo| assert_eq!(*todo, Todo::new(0, "new")))
            .run();
    }

    #[test]
    fn test_item_toggle_matching_id() {
        ReducerTest::new(TodoReducer)
            .given_state(Todo::new(2, "walk"))
            .when_action(TodoAction::ToggleTodo { id: 2 })
            .then_changed()
            .then_state(|todo| assert!(todo.completed))
            .run();
    }

    #[test]
    fn test_item_toggle_other_id_is_identity() {
        ReducerTest::new(TodoReducer)
            .given_state(Todo::new(2, "walk"))
            .when_action(TodoAction::ToggleTodo { id: 3 })
            .then_unchanged()
            .run();
    }

    #[test]
    fn test_item_toggle_without_state_yields_default() {
        ReducerTest::new(TodoReducer)
            .when_action(TodoAction::ToggleTodo { id: 0 })
            .then_state(|todo| assert_eq!(*todo, Todo::default()))
            .run();
    }

    #[test]
    fn test_list_add_appends() {
        let todos = list(&[Todo::new(0, "a")]);
        let next = TodosReducer.reduce(
            Some(&todos),
            &TodoAction::AddTodo { id: 1, text: "b".to_string() },
        );

        assert_eq!(next.len(), 2);
        assert!(Arc::ptr_eq(&todos[0], &next[0]));
        assert_eq!(*next[1], Todo::new(1, "b"));
        assert_eq!(todos.len(), 1);
    }

    #[test]
    fn test_list_toggle_only_touches_match() {
        let todos = list(&[Todo::new(0, "a"), Todo::new(1, "b")]);
        let next = TodosReducer.reduce(Some(&todos), &TodoAction::ToggleTodo { id: 1 });

        assert!(Arc::ptr_eq(&todos[0], &next[0]));
        assert!(next[1].completed);
        assert!(!todos[1].completed);
    }

    #[test]
    fn test_list_toggle_missing_id_is_identity() {
        let todos = list(&[Todo::new(0, "a")]);
        let next = ReducerTest::new(TodosReducer)
            .given_shared_state(Arc::clone(&todos))
            .when_action(TodoAction::ToggleTodo { id: 9 })
            .then_unchanged()
            .run();
        assert!(Arc::ptr_eq(&todos[0], &next[0]));
    }

    #[test]
    fn test_filter_reducer() {
        let initial = VisibilityFilterReducer.reduce(None, &TodoAction::init());
        assert_eq!(*initial, VisibilityFilter::ShowAll);

        let next = assertions::assert_changed(
            &VisibilityFilterReducer,
            &initial,
            &TodoAction::SetVisibilityFilter { filter: VisibilityFilter::ShowCompleted },
        );
        assert_eq!(*next, VisibilityFilter::ShowCompleted);

        assertions::assert_identity(
            &VisibilityFilterReducer,
            &next,
            &TodoAction::SetVisibilityFilter { filter: VisibilityFilter::ShowCompleted },
        );
    }

    #[test]
    fn test_unknown_action_is_identity_everywhere() {
        let app = TodoApp.reduce(None, &TodoAction::init());
        assertions::assert_identity(&TodoApp, &app, &TodoAction::Unknown);
        assertions::assert_identity(&TodosReducer, &app.todos, &TodoAction::Unknown);
        assertions::assert_identity(&VisibilityFilterReducer, &app.visibility_filter, &TodoAction::Unknown);
        assertions::assert_identity(&TodoReducer, &Arc::new(Todo::new(0, "x")), &TodoAction::Unknown);
    }

    #[test]
    fn test_app_default_state() {
        let app = TodoApp.reduce(None, &TodoAction::init());
        assert!(app.todos.is_empty());
        assert_eq!(*app.visibility_filter, VisibilityFilter::ShowAll);
    }

    #[test]
    fn test_app_filter_change_keeps_list() {
        let app = TodoApp.reduce(None, &TodoAction::AddTodo { id: 0, text: "a".to_string() });
        let next = TodoApp.reduce(
            Some(&app),
            &TodoAction::SetVisibilityFilter { filter: VisibilityFilter::ShowActive },
        );

        assert!(Arc::ptr_eq(&app.todos, &next.todos));
        assert_eq!(*next.visibility_filter, VisibilityFilter::ShowActive);
    }

    #[test]
    fn test_visible_todos() {
        let mut done = Todo::new(1, "done");
        done.completed = true;
        let todos = list(&[Todo::new(0, "open"), done]);

        let ids = |filter| -> Vec<u64> {
            visible_todos(&todos, filter).iter().map(|todo| todo.id).collect()
        };
        assert_eq!(ids(VisibilityFilter::ShowAll), vec![0, 1]);
        assert_eq!(ids(VisibilityFilter::ShowActive), vec![0]);
        assert_eq!(ids(VisibilityFilter::ShowCompleted), vec![1]);
        assert_eq!(ids(VisibilityFilter::from_tag("SHOW_NOTHING")), vec![0, 1]);
    }
}
