//! Prometheus metrics for the RPC surface.
//!
//! # Exported Metrics
//!
//! - `todo_rpc_requests_total{procedure, outcome}` - Procedure calls by outcome
//! - `todo_rpc_duration_seconds{procedure}` - Time spent inside the store call
//!
//! Recording is a no-op until a recorder is installed (see `main.rs`).

use metrics::{describe_counter, describe_histogram};
use std::time::Duration;
use todo_manager_core::TodoError;

/// Register metric descriptions.
///
/// Called once at startup, after the Prometheus recorder is installed.
pub fn register_rpc_metrics() {
    describe_counter!(
        "todo_rpc_requests_total",
        "Total number of RPC procedure calls by procedure and outcome"
    );
    describe_histogram!(
        "todo_rpc_duration_seconds",
        "Time taken by the store to answer an RPC procedure"
    );

    tracing::info!("RPC metrics registered");
}

/// Outcome label for a procedure result.
#[must_use]
pub const fn outcome(error: Option<&TodoError>) -> &'static str {
    match error {
        None => "ok",
        Some(TodoError::NotFound { .. }) => "not_found",
        Some(TodoError::Validation(_)) => "invalid",
        Some(TodoError::Unavailable(_)) => "unavailable",
        Some(TodoError::Database(_) | TodoError::Decode(_)) => "error",
    }
}

/// Record one procedure call.
pub fn record_rpc(procedure: &'static str, error: Option<&TodoError>, elapsed: Duration) {
    let outcome = outcome(error);
    metrics::counter!("todo_rpc_requests_total", "procedure" => procedure, "outcome" => outcome)
        .increment(1);
    metrics::histogram!("todo_rpc_duration_seconds", "procedure" => procedure)
        .record(elapsed.as_secs_f64());
    tracing::debug!(procedure, outcome, "Recorded rpc metric");
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_manager_core::TodoId;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(outcome(None), "ok");
        assert_eq!(
            outcome(Some(&TodoError::NotFound {
                id: TodoId::new(1)
            })),
            "not_found"
        );
        assert_eq!(
            outcome(Some(&TodoError::Validation(String::new()))),
            "invalid"
        );
        assert_eq!(outcome(Some(&TodoError::Decode(String::new()))), "error");
    }

    #[test]
    fn test_record_without_recorder_is_noop() {
        record_rpc("getTodos", None, Duration::from_millis(3));
    }
}
