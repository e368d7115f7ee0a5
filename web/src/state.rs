//! Application state for Axum handlers.

use std::sync::Arc;
use todo_manager_core::TodoStore;

/// Application state shared across all HTTP handlers.
///
/// Holds the store behind a trait object so the same router serves
/// `PostgreSQL` in production and an in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    /// The todo store every procedure delegates to
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
