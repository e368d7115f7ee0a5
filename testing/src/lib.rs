//! # Todo Manager Testing
//!
//! Testing utilities and helpers for Todo Manager.
//!
//! This crate provides:
//! - Mock implementations of Environment traits and of `TodoStore`
//! - A Given-When-Then harness for reducers
//! - Property-based testing strategies for todo lists
//!
//! ## Example
//!
//! ```
//! use todo_manager_core::{CreateTodoInput, TodoStore};
//! use todo_manager_testing::InMemoryTodoStore;
//!
//! # async fn example() {
//! let store = InMemoryTodoStore::new();
//! let todo = store.create(CreateTodoInput::new("Buy milk")).await.unwrap();
//! assert!(!todo.completed);
//!
//! store.set_available(false);
//! assert!(store.list().await.is_err());
//! # }
//! ```

use chrono::{DateTime, Utc};
use todo_manager_core::environment::Clock;

pub mod reducer_test;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::{Arc, Mutex, MutexGuard};
    use todo_manager_core::store::{StoreFuture, TodoStore};
    use todo_manager_core::todo::sort_newest_first;
    use todo_manager_core::{
        CreateTodoInput, DeleteTodoInput, DeleteTodoResult, Todo, TodoError, TodoId,
        UpdateTodoStatusInput,
    };

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_manager_testing::mocks::FixedClock;
    /// use todo_manager_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::from_timestamp(1_735_689_600, 0).unwrap_or_default(),
        )
    }

    #[derive(Debug)]
    struct Table {
        todos: Vec<Todo>,
        next_id: i32,
        available: bool,
        calls: usize,
    }

    /// In-memory `TodoStore` with server semantics.
    ///
    /// Ids come from a counter that is never reused, like a database sequence.
    /// The store can be switched unavailable to simulate a dead backend; every
    /// call then fails with `TodoError::Unavailable` and leaves the data untouched.
    #[derive(Clone)]
    pub struct InMemoryTodoStore {
        table: Arc<Mutex<Table>>,
        clock: Arc<dyn Clock>,
    }

    impl std::fmt::Debug for InMemoryTodoStore {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("InMemoryTodoStore")
                .field("table", &self.table)
                .finish_non_exhaustive()
        }
    }

    impl InMemoryTodoStore {
        /// Empty, available store using [`test_clock`]
        #[must_use]
        pub fn new() -> Self {
            Self::with_clock(Arc::new(test_clock()))
        }

        /// Empty, available store using the given clock
        #[must_use]
        pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
            Self {
                table: Arc::new(Mutex::new(Table {
                    todos: Vec::new(),
                    next_id: 1,
                    available: true,
                    calls: 0,
                })),
                clock,
            }
        }

        /// A store that refuses every call
        #[must_use]
        pub fn unavailable() -> Self {
            let store = Self::new();
            store.set_available(false);
            store
        }

        /// Toggle whether calls succeed
        pub fn set_available(&self, available: bool) {
            if let Ok(mut table) = self.table.lock() {
                table.available = available;
            }
        }

        /// Number of store calls received so far, including refused ones
        #[must_use]
        pub fn calls(&self) -> usize {
            self.table.lock().map(|t| t.calls).unwrap_or_default()
        }

        /// Current contents, newest first
        #[must_use]
        pub fn snapshot(&self) -> Vec<Todo> {
            let mut todos = self
                .table
                .lock()
                .map(|t| t.todos.clone())
                .unwrap_or_default();
            sort_newest_first(&mut todos);
            todos
        }

        /// Insert a record directly, bypassing availability and call counting
        pub fn insert(&self, title: &str, completed: bool, created_at: DateTime<Utc>) -> Todo {
            let Ok(mut table) = self.table.lock() else {
                return Todo::new(TodoId::new(0), title, created_at);
            };
            let todo = Todo::new(TodoId::new(table.next_id), title, created_at)
                .with_completed(completed);
            table.next_id += 1;
            table.todos.push(todo.clone());
            todo
        }

        fn open(&self) -> Result<MutexGuard<'_, Table>, TodoError> {
            let mut table = self
                .table
                .lock()
                .map_err(|_| TodoError::Unavailable("store lock poisoned".to_string()))?;
            table.calls += 1;
            if !table.available {
                return Err(TodoError::Unavailable("connection refused".to_string()));
            }
            Ok(table)
        }
    }

    impl Default for InMemoryTodoStore {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TodoStore for InMemoryTodoStore {
        fn list(&self) -> StoreFuture<'_, Vec<Todo>> {
            let result = self.open().map(|table| {
                let mut todos = table.todos.clone();
                sort_newest_first(&mut todos);
                todos
            });
            Box::pin(async move { result })
        }

        fn create(&self, input: CreateTodoInput) -> StoreFuture<'_, Todo> {
            let created_at = self.clock.now();
            let result = self.open().map(|mut table| {
                let todo = Todo::new(TodoId::new(table.next_id), input.title, created_at);
                table.next_id += 1;
                table.todos.push(todo.clone());
                todo
            });
            Box::pin(async move { result })
        }

        fn update_status(&self, input: UpdateTodoStatusInput) -> StoreFuture<'_, Todo> {
            let result = self.open().and_then(|mut table| {
                let todo = table
                    .todos
                    .iter_mut()
                    .find(|t| t.id == input.id)
                    .ok_or(TodoError::NotFound { id: input.id })?;
                todo.completed = input.completed;
                Ok(todo.clone())
            });
            Box::pin(async move { result })
        }

        fn delete(&self, input: DeleteTodoInput) -> StoreFuture<'_, DeleteTodoResult> {
            let result = self.open().map(|mut table| {
                let before = table.todos.len();
                table.todos.retain(|t| t.id != input.id);
                DeleteTodoResult {
                    success: table.todos.len() < before,
                }
            });
            Box::pin(async move { result })
        }

        fn ping(&self) -> StoreFuture<'_, ()> {
            let result = self.open().map(|_| ());
            Box::pin(async move { result })
        }
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;
    use todo_manager_core::{Todo, TodoId};

    /// Timestamps within 2024, to the second
    pub fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
        (1_704_067_200_i64..1_735_689_600_i64)
            .prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }

    /// A single todo with the given id
    pub fn arb_todo(id: i32) -> impl Strategy<Value = Todo> {
        ("[a-z ]{1,20}", any::<bool>(), arb_timestamp()).prop_map(move |(title, done, at)| {
            Todo::new(TodoId::new(id), title, at).with_completed(done)
        })
    }

    /// Up to `max` todos with distinct positive ids (not necessarily contiguous)
    pub fn arb_todos(max: usize) -> impl Strategy<Value = Vec<Todo>> {
        prop::collection::btree_set(1_i32..10_000, 0..=max).prop_flat_map(|ids| {
            ids.into_iter().map(arb_todo).collect::<Vec<_>>()
        })
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, InMemoryTodoStore, test_clock};
pub use reducer_test::ReducerTest;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use todo_manager_core::{
        CreateTodoInput, DeleteTodoInput, TodoError, TodoId, TodoStore, UpdateTodoStatusInput,
    };

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[tokio::test]
    async fn in_memory_store_assigns_sequential_ids() {
        let store = InMemoryTodoStore::new();
        let a = store.create(CreateTodoInput::new("a")).await.unwrap();
        let b = store.create(CreateTodoInput::new("b")).await.unwrap();
        assert_eq!(a.id, TodoId::new(1));
        assert_eq!(b.id, TodoId::new(2));

        store.delete(DeleteTodoInput { id: b.id }).await.unwrap();
        let c = store.create(CreateTodoInput::new("c")).await.unwrap();
        assert_eq!(c.id, TodoId::new(3));
    }

    #[tokio::test]
    async fn in_memory_store_lists_newest_first() {
        let store = InMemoryTodoStore::new();
        for title in ["First", "Second", "Third"] {
            store.create(CreateTodoInput::new(title)).await.unwrap();
        }
        let titles: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn in_memory_store_reports_missing_records() {
        let store = InMemoryTodoStore::new();
        let id = TodoId::new(42);
        assert_eq!(
            store
                .update_status(UpdateTodoStatusInput { id, completed: true })
                .await,
            Err(TodoError::NotFound { id })
        );
        assert!(!store.delete(DeleteTodoInput { id }).await.unwrap().success);
    }

    #[tokio::test]
    async fn unavailable_store_refuses_and_counts_calls() {
        let store = InMemoryTodoStore::unavailable();
        assert!(matches!(
            store.list().await,
            Err(TodoError::Unavailable(_))
        ));
        assert!(store.create(CreateTodoInput::new("x")).await.is_err());
        assert_eq!(store.calls(), 2);
        assert!(store.snapshot().is_empty());
    }
}
