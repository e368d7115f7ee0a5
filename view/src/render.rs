//! Plain-text rendering of the todo view.

use crate::stats::partition;
use crate::types::TodoViewState;
use std::fmt::Write;
use todo_manager_core::Todo;

fn line(out: &mut String, todo: &Todo) {
    let mark = if todo.completed { 'x' } else { ' ' };
    let _ = writeln!(
        out,
        "  [{mark}] #{:<4} {}  (created {})",
        todo.id.get(),
        todo.title,
        todo.created_at.format("%Y-%m-%d")
    );
}

/// Render the view as terminal text.
#[must_use]
pub fn render(state: &TodoViewState) -> String {
    let mut out = String::from("Todo Manager\n\n");

    if let Some(banner) = &state.backend_error {
        let _ = writeln!(
            out,
            "Demo Mode: {banner}. All functionality works locally.\n"
        );
    }
    if let Some(error) = &state.last_error {
        let _ = writeln!(out, "Error: {error}\n");
    }

    if state.is_loading() {
        out.push_str("Loading todos...\n");
        return out;
    }
    if state.todos.is_empty() {
        out.push_str("No todos yet! Add your first todo to get started.\n");
        return out;
    }

    let stats = state.stats();
    let _ = write!(
        out,
        "Total: {}  Completed: {}  Pending: {}",
        stats.total, stats.completed, stats.pending
    );
    if let Some(percentage) = stats.percentage {
        let _ = write!(out, "  {percentage}% Complete");
    }
    out.push_str("\n\n");

    let (pending, completed) = partition(&state.todos);
    if !pending.is_empty() {
        let _ = writeln!(out, "Pending Tasks ({})", pending.len());
        for todo in pending {
            line(&mut out, todo);
        }
        out.push('\n');
    }
    if !completed.is_empty() {
        let _ = writeln!(out, "Completed Tasks ({})", completed.len());
        for todo in completed {
            line(&mut out, todo);
        }
        out.push('\n');
    }

    out.push_str(if state.using_local_data() {
        "All changes are working locally.\n"
    } else {
        "Connected to backend API.\n"
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::demo_todos;
    use crate::types::{BACKEND_UNAVAILABLE, ViewMode};

    #[test]
    fn test_loading() {
        assert!(render(&TodoViewState::new()).contains("Loading todos..."));
    }

    #[test]
    fn test_empty_ready_view() {
        let state = TodoViewState {
            mode: ViewMode::Ready,
            ..TodoViewState::new()
        };
        let text = render(&state);
        assert!(text.contains("No todos yet!"));
        assert!(!text.contains("% Complete"));
    }

    #[test]
    fn test_degraded_demo_view() {
        let state = TodoViewState {
            todos: demo_todos(),
            mode: ViewMode::Degraded,
            backend_error: Some(BACKEND_UNAVAILABLE.to_string()),
            ..TodoViewState::new()
        };
        let text = render(&state);
        assert!(text.contains("Demo Mode: Backend not available - using demo data"));
        assert!(text.contains("Total: 3  Completed: 1  Pending: 2  33% Complete"));
        assert!(text.contains("Pending Tasks (2)"));
        assert!(text.contains("Completed Tasks (1)"));
        assert!(text.contains("[x] #1    Learn React and TypeScript  (created 2024-01-15)"));
        assert!(text.ends_with("All changes are working locally.\n"));

        let pending_at = text.find("Deploy to production");
        let older_at = text.find("Build a todo application");
        assert!(pending_at < older_at);
    }
}
