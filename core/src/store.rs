//! The todo store contract.
//!
//! # Implementations
//!
//! - `PostgresTodoStore` (in `todo-manager-postgres`): the durable server-side table
//! - `HttpTodoClient` (in `todo-manager-view`): the same procedures over HTTP
//! - `LocalTodoStore` (in `todo-manager-view`): in-memory fallback for degraded views
//! - `InMemoryTodoStore` (in `todo-manager-testing`): fast, deterministic testing
//!
//! # Dyn Compatibility
//!
//! This trait uses explicit `Pin<Box<dyn Future>>` returns instead of `async fn`
//! so it can be used as `Arc<dyn TodoStore>`. Reducers capture the store inside
//! effects, which must be `Send + 'static`.

use crate::error::TodoError;
use crate::todo::{
    CreateTodoInput, DeleteTodoInput, DeleteTodoResult, Todo, UpdateTodoStatusInput,
};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by every store operation.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, TodoError>> + Send + 'a>>;

/// The four todo procedures.
///
/// Every operation touches at most one record, so implementations need no
/// cross-call coordination.
pub trait TodoStore: Send + Sync {
    /// List all todos, newest first.
    ///
    /// An empty store yields an empty vector, never an error.
    ///
    /// # Errors
    ///
    /// - `Database` / `Unavailable`: the store could not be read
    fn list(&self) -> StoreFuture<'_, Vec<Todo>>;

    /// Create a todo with `completed = false`.
    ///
    /// The store assigns `id` and `created_at`. Titles are not unique.
    ///
    /// # Errors
    ///
    /// - `Validation`: only from implementations that sit behind an RPC boundary
    /// - `Database` / `Unavailable`: the insert could not be performed
    fn create(&self, input: CreateTodoInput) -> StoreFuture<'_, Todo>;

    /// Set the `completed` flag of one todo and return the updated record.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no record has `input.id`
    /// - `Database` / `Unavailable`: the update could not be performed
    fn update_status(&self, input: UpdateTodoStatusInput) -> StoreFuture<'_, Todo>;

    /// Remove one todo.
    ///
    /// Returns `success = false` when nothing matched.
    ///
    /// # Errors
    ///
    /// - `Database` / `Unavailable`: the delete could not be performed
    fn delete(&self, input: DeleteTodoInput) -> StoreFuture<'_, DeleteTodoResult>;

    /// Check that the backing storage is reachable.
    ///
    /// # Errors
    ///
    /// Returns the storage failure if the store cannot be reached.
    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}
