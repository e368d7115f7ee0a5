//! Todo procedures.
//!
//! Each handler validates its input, makes exactly one store call and maps the
//! typed outcome to a response:
//!
//! - GET  /rpc/getTodos         - list, newest first
//! - POST /rpc/createTodo       - create with `completed = false`
//! - POST /rpc/updateTodoStatus - set `completed`, 404 for unknown ids
//! - POST /rpc/deleteTodo       - delete, `{success: false}` for unknown ids

use crate::WebResult;
use crate::extractors::{CorrelationId, RpcInput};
use crate::metrics::record_rpc;
use crate::state::AppState;
use axum::{Json, extract::State};
use std::time::Instant;
use todo_manager_core::{
    CreateTodoInput, DeleteTodoInput, DeleteTodoResult, Todo, TodoError, UpdateTodoStatusInput,
};

/// Record the call and turn the store result into a response.
fn finish<T>(
    procedure: &'static str,
    started: Instant,
    result: Result<T, TodoError>,
) -> WebResult<Json<T>> {
    record_rpc(procedure, result.as_ref().err(), started.elapsed());
    match result {
        Ok(value) => Ok(Json(value)),
        Err(error) => {
            tracing::debug!(procedure, error = %error, "Procedure failed");
            Err(error.into())
        },
    }
}

/// List all todos, newest first.
///
/// # Errors
///
/// Returns a 500 or 503 error if the store cannot be read.
#[tracing::instrument(skip_all, fields(correlation_id = %correlation_id.0))]
pub async fn get_todos(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
) -> WebResult<Json<Vec<Todo>>> {
    let started = Instant::now();
    let result = state.store.list().await;
    if let Ok(todos) = &result {
        tracing::debug!(count = todos.len(), "Listed todos");
    }
    finish("getTodos", started, result)
}

/// Create a todo.
///
/// # Errors
///
/// Returns 422 for a blank title, 400 for a malformed body, 500/503 on
/// storage failure.
#[tracing::instrument(skip_all, fields(correlation_id = %correlation_id.0))]
pub async fn create_todo(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    RpcInput(input): RpcInput<CreateTodoInput>,
) -> WebResult<Json<Todo>> {
    let started = Instant::now();
    if let Err(error) = input.validate() {
        return finish("createTodo", started, Err(error));
    }
    let result = state.store.create(input).await;
    if let Ok(todo) = &result {
        tracing::info!(id = %todo.id, "Todo created");
    }
    finish("createTodo", started, result)
}

/// Set the completion flag of a todo.
///
/// # Errors
///
/// Returns 404 with "Todo with id {id} not found" when no todo matches.
#[tracing::instrument(skip_all, fields(correlation_id = %correlation_id.0, id = %input.id))]
pub async fn update_todo_status(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    RpcInput(input): RpcInput<UpdateTodoStatusInput>,
) -> WebResult<Json<Todo>> {
    let started = Instant::now();
    let result = state.store.update_status(input).await;
    finish("updateTodoStatus", started, result)
}

/// Delete a todo.
///
/// An unknown id is not an error: the response is `{"success": false}`.
///
/// # Errors
///
/// Returns 500/503 on storage failure.
#[tracing::instrument(skip_all, fields(correlation_id = %correlation_id.0, id = %input.id))]
pub async fn delete_todo(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    RpcInput(input): RpcInput<DeleteTodoInput>,
) -> WebResult<Json<DeleteTodoResult>> {
    let started = Instant::now();
    let result = state.store.delete(input).await;
    if let Ok(DeleteTodoResult { success: false }) = &result {
        tracing::debug!(id = %input.id, "Delete matched no todo");
    }
    finish("deleteTodo", started, result)
}
