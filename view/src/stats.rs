//! Display derivations over a todo list.

use todo_manager_core::Todo;

/// Counts shown above the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TodoStats {
    /// All todos
    pub total: usize,
    /// Todos with `completed = true`
    pub completed: usize,
    /// Todos with `completed = false`
    pub pending: usize,
    /// `round(completed / total * 100)`, `None` for an empty list
    pub percentage: Option<usize>,
}

impl TodoStats {
    /// Derive the stats of a list.
    #[must_use]
    pub fn from_todos(todos: &[Todo]) -> Self {
        let total = todos.len();
        let completed = todos.iter().filter(|t| t.completed).count();
        Self {
            total,
            completed,
            pending: total - completed,
            percentage: completion_percentage(completed, total),
        }
    }
}

/// Percentage rounded half up, in integer arithmetic.
#[must_use]
pub const fn completion_percentage(completed: usize, total: usize) -> Option<usize> {
    if total == 0 {
        return None;
    }
    Some((completed * 200 + total) / (2 * total))
}

/// Split a list into (pending, completed), keeping order.
#[must_use]
pub fn partition(todos: &[Todo]) -> (Vec<&Todo>, Vec<&Todo>) {
    todos.iter().partition(|t| !t.completed)
}
