//! `PostgreSQL`-backed `TodoStore`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use todo_manager_core::error::Result;
use todo_manager_core::store::{StoreFuture, TodoStore};
use todo_manager_core::{
    CreateTodoInput, DeleteTodoInput, DeleteTodoResult, Todo, TodoError, TodoId,
    UpdateTodoStatusInput,
};

/// Connection pool sizing for [`PostgresTodoStore::connect_with`].
#[derive(Debug, Clone, Copy)]
pub struct PoolOptions {
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of idle connections in the pool
    pub min_connections: u32,
    /// How long to wait for a connection before giving up
    pub connect_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

/// Row as stored in the `todos` table.
#[derive(sqlx::FromRow)]
struct TodoRow {
    id: i32,
    title: String,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: TodoId::new(row.id),
            title: row.title,
            completed: row.completed,
            created_at: row.created_at,
        }
    }
}

/// `PostgreSQL` todo store.
///
/// The table is the sole source of truth; ids come from the `SERIAL` sequence
/// and `created_at` from the column default.
#[derive(Clone, Debug)]
pub struct PostgresTodoStore {
    pool: PgPool,
}

impl PostgresTodoStore {
    /// Connect with default pool options.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Database` if the connection cannot be established.
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::connect_with(database_url, &PoolOptions::default()).await
    }

    /// Connect with explicit pool options.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Database` if the connection cannot be established.
    pub async fn connect_with(database_url: &str, options: &PoolOptions) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(options.max_connections)
            .min_connections(options.min_connections)
            .acquire_timeout(options.connect_timeout)
            .connect(database_url)
            .await
            .map_err(|e| TodoError::Database(format!("Failed to connect: {e}")))?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run the bundled migrations.
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Database` if a migration fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| TodoError::Database(format!("Migration failed: {e}")))?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn list_todos(&self) -> Result<Vec<Todo>> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            "SELECT id, title, completed, created_at
             FROM todos
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TodoError::Database(format!("Failed to list todos: {e}")))?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    #[tracing::instrument(skip(self, input))]
    async fn insert_todo(&self, input: CreateTodoInput) -> Result<Todo> {
        let row: TodoRow = sqlx::query_as(
            "INSERT INTO todos (title)
             VALUES ($1)
             RETURNING id, title, completed, created_at",
        )
        .bind(&input.title)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TodoError::Database(format!("Failed to create todo: {e}")))?;

        tracing::debug!(id = row.id, "Todo created");
        Ok(row.into())
    }

    #[tracing::instrument(skip(self), fields(id = %input.id))]
    async fn set_completed(&self, input: UpdateTodoStatusInput) -> Result<Todo> {
        let row: Option<TodoRow> = sqlx::query_as(
            "UPDATE todos
             SET completed = $2
             WHERE id = $1
             RETURNING id, title, completed, created_at",
        )
        .bind(input.id.get())
        .bind(input.completed)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TodoError::Database(format!("Failed to update todo: {e}")))?;

        match row {
            Some(row) => Ok(row.into()),
            None => {
                tracing::warn!("Status update for unknown todo");
                Err(TodoError::NotFound { id: input.id })
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %input.id))]
    async fn delete_todo(&self, input: DeleteTodoInput) -> Result<DeleteTodoResult> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(input.id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| TodoError::Database(format!("Failed to delete todo: {e}")))?;

        Ok(DeleteTodoResult {
            success: result.rows_affected() > 0,
        })
    }
}

impl TodoStore for PostgresTodoStore {
    fn list(&self) -> StoreFuture<'_, Vec<Todo>> {
        Box::pin(self.list_todos())
    }

    fn create(&self, input: CreateTodoInput) -> StoreFuture<'_, Todo> {
        Box::pin(self.insert_todo(input))
    }

    fn update_status(&self, input: UpdateTodoStatusInput) -> StoreFuture<'_, Todo> {
        Box::pin(self.set_completed(input))
    }

    fn delete(&self, input: DeleteTodoInput) -> StoreFuture<'_, DeleteTodoResult> {
        Box::pin(self.delete_todo(input))
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map_err(|e| TodoError::Database(format!("Ping failed: {e}")))?;
            Ok(())
        })
    }
}
