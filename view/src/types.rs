//! State and actions of the todo view.

use crate::stats::TodoStats;
use todo_manager_core::{Todo, TodoError, TodoId};

/// Banner text shown once the view has fallen back to local data.
pub const BACKEND_UNAVAILABLE: &str = "Backend not available - using demo data";

/// Where the view currently gets its data from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Initial list request in flight
    #[default]
    Loading,
    /// Backed by the remote store
    Ready,
    /// Backed by the local store for the rest of the session
    Degraded,
}

/// State of the todo view.
///
/// `todos` is kept newest first. In `Degraded` mode it mirrors the local
/// store; otherwise it mirrors what the server last returned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoViewState {
    /// Displayed todos, newest first
    pub todos: Vec<Todo>,
    /// Current data source
    pub mode: ViewMode,
    /// Banner message while degraded
    pub backend_error: Option<String>,
    /// Last failed command (not found, blank title, ...)
    pub last_error: Option<String>,
    /// A create is in flight
    pub creating: bool,
}

impl TodoViewState {
    /// Empty view waiting for its first load
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the displayed data comes from the local store
    #[must_use]
    pub fn using_local_data(&self) -> bool {
        self.mode == ViewMode::Degraded
    }

    /// Whether the initial list is still loading
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.mode == ViewMode::Loading
    }

    /// Counts and completion percentage of the displayed todos
    #[must_use]
    pub fn stats(&self) -> TodoStats {
        TodoStats::from_todos(&self.todos)
    }

    /// Look up a displayed todo
    #[must_use]
    pub fn find(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }
}

/// A mutation sent to a store.
///
/// Kept on failure events so the same mutation can be replayed against the
/// local store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoRequest {
    /// Create a todo with an already trimmed title
    Create {
        /// Title
        title: String,
    },
    /// Set the completion flag
    SetStatus {
        /// Target todo
        id: TodoId,
        /// New value
        completed: bool,
    },
    /// Delete a todo
    Delete {
        /// Target todo
        id: TodoId,
    },
}

/// Actions of the todo view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoViewAction {
    // Commands
    /// Start a session: fetch the list from the remote store
    Load,
    /// Create a todo from user input
    CreateTodo {
        /// Raw title as typed
        title: String,
    },
    /// Flip the completion flag of a displayed todo
    ToggleTodo {
        /// Target todo
        id: TodoId,
    },
    /// Delete a displayed todo
    DeleteTodo {
        /// Target todo
        id: TodoId,
    },

    // Events
    /// The remote list arrived
    TodosLoaded {
        /// Todos as returned by the server
        todos: Vec<Todo>,
    },
    /// The remote list could not be fetched
    LoadFailed {
        /// Why
        error: TodoError,
    },
    /// A todo was created
    TodoCreated {
        /// The created record
        todo: Todo,
    },
    /// A todo's status was updated
    TodoUpdated {
        /// The updated record
        todo: Todo,
    },
    /// A delete completed
    TodoDeleted {
        /// Target todo
        id: TodoId,
        /// Whether a record was removed
        success: bool,
    },
    /// A mutation failed
    RequestFailed {
        /// The mutation that failed
        request: TodoRequest,
        /// Why
        error: TodoError,
    },
}
