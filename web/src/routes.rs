//! Router configuration.

use crate::handlers::{health, todos};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the complete Axum router.
///
/// - `/health`, `/ready`: probes
/// - `/rpc/*`: the four todo procedures
///
/// Every route gets a correlation id, request tracing and permissive CORS
/// (the browser client is served from a different origin).
pub fn build_router(state: AppState) -> Router {
    let rpc_routes = Router::new()
        .route("/getTodos", get(todos::get_todos))
        .route("/createTodo", post(todos::create_todo))
        .route("/updateTodoStatus", post(todos::update_todo_status))
        .route("/deleteTodo", post(todos::delete_todo));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/rpc", rpc_routes)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
