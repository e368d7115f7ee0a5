//! Domain types for todo records and the inputs of each remote procedure.
//!
//! The wire shape of every type here is the JSON contract between the RPC
//! server and its clients, so field names are part of the public surface.

use crate::error::TodoError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a todo record (sequence-backed).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i32);

impl TodoId {
    /// Wraps a raw identifier
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for TodoId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Title of the todo, immutable after creation
    pub title: String,
    /// Whether the todo is completed
    pub completed: bool,
    /// When the todo was created; the sort key
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a new, not yet completed todo
    #[must_use]
    pub fn new(id: TodoId, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
            created_at,
        }
    }

    /// Returns a copy with the given completion state
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Sorts todos newest first, breaking timestamp ties by the larger id.
pub fn sort_newest_first(todos: &mut [Todo]) {
    todos.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Input of the create procedure
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodoInput {
    /// Title of the new todo
    pub title: String,
}

impl CreateTodoInput {
    /// Creates the input from a title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Rejects blank titles.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Validation`] if the title is empty after trimming.
    pub fn validate(&self) -> Result<(), TodoError> {
        if self.title.trim().is_empty() {
            return Err(TodoError::Validation(
                "Todo title cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input of the update-status procedure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodoStatusInput {
    /// Todo to update
    pub id: TodoId,
    /// New completion state
    pub completed: bool,
}

/// Input of the delete procedure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTodoInput {
    /// Todo to delete
    pub id: TodoId,
}

/// Output of the delete procedure.
///
/// `success` is `false` when nothing matched; that is not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTodoResult {
    /// Whether a record was removed
    pub success: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn new_todo_is_pending() {
        let todo = Todo::new(TodoId::new(1), "Test Todo", at(1));
        assert!(!todo.completed);
        assert_eq!(todo.title, "Test Todo");
        assert!(todo.with_completed(true).completed);
    }

    #[test]
    fn todo_json_shape() {
        let todo = Todo::new(TodoId::new(4), "Ship it", at(2));
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["title"], "Ship it");
        assert_eq!(json["completed"], false);
        assert_eq!(json["created_at"], "2024-01-02T00:00:00Z");
    }

    #[test]
    fn blank_titles_are_rejected() {
        assert!(CreateTodoInput::new("Test Todo").validate().is_ok());
        assert!(matches!(
            CreateTodoInput::new("").validate(),
            Err(TodoError::Validation(_))
        ));
        assert!(CreateTodoInput::new(" \t ").validate().is_err());
    }

    #[test]
    fn sorting_is_newest_first_with_id_tiebreak() {
        let mut todos = vec![
            Todo::new(TodoId::new(1), "First", at(1)),
            Todo::new(TodoId::new(3), "Third", at(3)),
            Todo::new(TodoId::new(2), "Second", at(3)),
        ];
        sort_newest_first(&mut todos);
        let titles: Vec<_> = todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Third", "Second", "First"]);
    }
}
