//! Error types for todo store operations.

use crate::todo::TodoId;
use thiserror::Error;

/// Result type alias for todo store operations.
pub type Result<T> = std::result::Result<T, TodoError>;

/// Every way a todo store call can fail.
///
/// Deleting a missing record is deliberately absent: it is reported as
/// `DeleteTodoResult { success: false }`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Status update targeted an id with no matching record.
    #[error("Todo with id {id} not found")]
    NotFound {
        /// The id that did not match
        id: TodoId,
    },

    /// Input rejected before reaching the store (e.g. blank title).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The store could not be reached or failed to answer.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Storage layer failure on the server.
    #[error("Database error: {0}")]
    Database(String),

    /// The store answered with a payload that could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl TodoError {
    /// Whether the call never produced an authoritative answer.
    ///
    /// Transport failures are the only errors that push a view into degraded mode.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Decode(_))
    }
}
