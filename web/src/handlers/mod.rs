//! HTTP request handlers.
//!
//! - `health`: liveness and readiness probes
//! - `todos`: the four todo procedures

pub mod health;
pub mod todos;

pub use health::{health_check, readiness_check};
pub use todos::{create_todo, delete_todo, get_todos, update_todo_status};
