//! Axum RPC server for Todo Manager.
//!
//! This crate is the imperative shell around a [`TodoStore`]: it parses JSON
//! requests, calls exactly one store procedure, and maps the typed result to an
//! HTTP response.
//!
//! # Procedures
//!
//! ```text
//! GET  /rpc/getTodos          → [Todo]
//! POST /rpc/createTodo        {title}          → Todo
//! POST /rpc/updateTodoStatus  {id, completed}  → Todo       (404 if id unknown)
//! POST /rpc/deleteTodo        {id}             → {success}
//! ```
//!
//! Plus `GET /health` (liveness) and `GET /ready` (database reachability).
//!
//! # Example
//!
//! ```ignore
//! use todo_manager_web::{build_router, AppState};
//! use todo_manager_postgres::PostgresTodoStore;
//! use std::sync::Arc;
//!
//! let store = PostgresTodoStore::new("postgres://localhost/todos").await?;
//! let app = build_router(AppState::new(Arc::new(store)));
//! axum::serve(listener, app).await?;
//! ```
//!
//! [`TodoStore`]: todo_manager_core::TodoStore

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use config::Config;
pub use error::AppError;
pub use extractors::{CorrelationId, RpcInput};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
