//! Todo Manager client.
//!
//! A reducer-driven todo list that talks to the server over HTTP and keeps
//! working when the server does not.
//!
//! # Modes
//!
//! ```text
//! Loading ──list ok──▶ Ready ──transport failure──▶ Degraded
//!    └──────list failed (demo data)───────────────────▲
//! ```
//!
//! Degraded lasts for the rest of the session: every further mutation goes to
//! the [`LocalTodoStore`]. Sending [`TodoViewAction::Load`] again starts a new
//! session against the server.
//!
//! # Example
//!
//! ```ignore
//! use todo_manager_view::{ViewConfig, TodoViewAction, connect, render};
//!
//! let view = connect(&ViewConfig::from_env())?;
//! view.send(TodoViewAction::Load).await;
//! view.send(TodoViewAction::CreateTodo { title: "Buy milk".into() }).await;
//! println!("{}", view.state(render).await);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod local;
pub mod reducer;
pub mod render;
pub mod runtime;
pub mod stats;
pub mod types;

pub use client::HttpTodoClient;
pub use config::ViewConfig;
pub use local::{LocalTodoStore, demo_todos};
pub use reducer::{TodoViewEnvironment, TodoViewReducer};
pub use render::render;
pub use stats::TodoStats;
pub use types::{TodoRequest, TodoViewAction, TodoViewState, ViewMode};

use std::sync::Arc;
use todo_manager_core::TodoError;
use todo_manager_core::environment::{Clock, SystemClock};

/// The todo view: state, reducer and environment behind one runtime.
pub type TodoView =
    runtime::Store<TodoViewState, TodoViewAction, TodoViewEnvironment, TodoViewReducer>;

/// Build a view over any remote store.
#[must_use]
pub fn todo_view(remote: Arc<dyn todo_manager_core::TodoStore>, clock: Arc<dyn Clock>) -> TodoView {
    let env = TodoViewEnvironment::new(remote, Arc::new(LocalTodoStore::new(clock)));
    TodoView::new(TodoViewState::new(), TodoViewReducer::new(), env)
}

/// Build a view backed by the HTTP server named in `config`.
///
/// # Errors
///
/// Returns `TodoError::Unavailable` if the HTTP client cannot be built.
pub fn connect(config: &ViewConfig) -> Result<TodoView, TodoError> {
    let client = HttpTodoClient::new(config.server_url.clone(), config.request_timeout)?;
    Ok(todo_view(Arc::new(client), Arc::new(SystemClock)))
}
