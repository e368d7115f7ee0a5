//! `PostgreSQL` todo store for Todo Manager.
//!
//! This crate provides the durable implementation of the `TodoStore` trait from
//! `todo-manager-core`. Each operation is a single parameterized SQL statement
//! against the `todos` table:
//!
//! - `list`: `SELECT ... ORDER BY created_at DESC`
//! - `create`: `INSERT ... RETURNING`
//! - `update_status`: `UPDATE ... RETURNING` (no row → `NotFound`)
//! - `delete`: `DELETE` (no row → `success = false`)
//!
//! # Example
//!
//! ```no_run
//! use todo_manager_postgres::PostgresTodoStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgresTodoStore::new("postgres://localhost/todos").await?;
//!     store.migrate().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod todo_store;

pub use todo_store::{PostgresTodoStore, PoolOptions};
