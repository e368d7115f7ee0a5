//! In-process `TodoStore` used once the backend is gone.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use todo_manager_core::environment::Clock;
use todo_manager_core::store::{StoreFuture, TodoStore};
use todo_manager_core::todo::sort_newest_first;
use todo_manager_core::{
    CreateTodoInput, DeleteTodoInput, DeleteTodoResult, Todo, TodoError, TodoId,
    UpdateTodoStatusInput,
};

/// Local fallback store.
///
/// Unlike the server, ids are `max(existing) + 1`, so an id can be handed out
/// again after the highest todo is deleted. Nothing is persisted.
pub struct LocalTodoStore {
    todos: Mutex<Vec<Todo>>,
    clock: Arc<dyn Clock>,
}

impl LocalTodoStore {
    /// Empty store stamping new todos with `clock`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            todos: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Replace the contents
    pub fn seed(&self, todos: Vec<Todo>) {
        if let Ok(mut guard) = self.todos.lock() {
            *guard = todos;
        }
    }

    /// Current contents, newest first
    #[must_use]
    pub fn snapshot(&self) -> Vec<Todo> {
        let mut todos = self
            .todos
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default();
        sort_newest_first(&mut todos);
        todos
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Todo>>, TodoError> {
        self.todos
            .lock()
            .map_err(|_| TodoError::Unavailable("local store lock poisoned".to_string()))
    }
}

impl std::fmt::Debug for LocalTodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalTodoStore")
            .field("todos", &self.todos)
            .finish_non_exhaustive()
    }
}

/// Next local id: one past the highest, 1 for an empty list.
///
/// `None` once the highest id is `i32::MAX`.
#[must_use]
pub fn next_local_id(todos: &[Todo]) -> Option<TodoId> {
    let max = todos.iter().map(|t| t.id.get()).max().unwrap_or(0);
    max.checked_add(1).map(TodoId::new)
}

impl TodoStore for LocalTodoStore {
    fn list(&self) -> StoreFuture<'_, Vec<Todo>> {
        let result = self.lock().map(|todos| {
            let mut todos = todos.clone();
            sort_newest_first(&mut todos);
            todos
        });
        Box::pin(async move { result })
    }

    fn create(&self, input: CreateTodoInput) -> StoreFuture<'_, Todo> {
        let created_at = self.clock.now();
        let result = self.lock().and_then(|mut todos| {
            let id = next_local_id(&todos).ok_or_else(|| {
                TodoError::Database("local todo ids are exhausted".to_string())
            })?;
            let todo = Todo::new(id, input.title, created_at);
            todos.push(todo.clone());
            Ok(todo)
        });
        Box::pin(async move { result })
    }

    fn update_status(&self, input: UpdateTodoStatusInput) -> StoreFuture<'_, Todo> {
        let result = self.lock().and_then(|mut todos| {
            let todo = todos
                .iter_mut()
                .find(|t| t.id == input.id)
                .ok_or(TodoError::NotFound { id: input.id })?;
            todo.completed = input.completed;
            Ok(todo.clone())
        });
        Box::pin(async move { result })
    }

    fn delete(&self, input: DeleteTodoInput) -> StoreFuture<'_, DeleteTodoResult> {
        let result = self.lock().map(|mut todos| {
            let before = todos.len();
            todos.retain(|t| t.id != input.id);
            DeleteTodoResult {
                success: todos.len() < before,
            }
        });
        Box::pin(async move { result })
    }
}

fn day(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// Built-in dataset shown when the first load fails, newest first.
#[must_use]
pub fn demo_todos() -> Vec<Todo> {
    let mut todos = vec![
        Todo::new(TodoId::new(1), "Learn React and TypeScript", day(1_705_276_800))
            .with_completed(true),
        Todo::new(TodoId::new(2), "Build a todo application", day(1_705_363_200)),
        Todo::new(TodoId::new(3), "Deploy to production", day(1_705_449_600)),
    ];
    sort_newest_first(&mut todos);
    todos
}
