//! Todo view reducer.
//!
//! Commands turn into exactly one store call. Which store answers is decided
//! here from [`ViewMode`]: the remote store while `Loading`/`Ready`, the local
//! store once `Degraded`. A transport failure of a remote mutation seeds the
//! local store with what is on screen, replays the mutation locally and
//! degrades the view for the rest of the session.

use crate::local::{LocalTodoStore, demo_todos};
use crate::types::{BACKEND_UNAVAILABLE, TodoRequest, TodoViewAction, TodoViewState, ViewMode};
use smallvec::{SmallVec, smallvec};
use std::sync::Arc;
use todo_manager_core::effect::Effect;
use todo_manager_core::reducer::Reducer;
use todo_manager_core::todo::sort_newest_first;
use todo_manager_core::{
    CreateTodoInput, DeleteTodoInput, Todo, TodoError, TodoId, TodoStore, UpdateTodoStatusInput,
};

/// Environment for the todo view.
#[derive(Clone)]
pub struct TodoViewEnvironment {
    /// The server (HTTP client in production)
    pub remote: Arc<dyn TodoStore>,
    /// Fallback used once the view is degraded
    pub local: Arc<LocalTodoStore>,
}

impl TodoViewEnvironment {
    /// Create a new environment
    #[must_use]
    pub fn new(remote: Arc<dyn TodoStore>, local: Arc<LocalTodoStore>) -> Self {
        Self { remote, local }
    }
}

impl std::fmt::Debug for TodoViewEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoViewEnvironment")
            .field("local", &self.local)
            .finish_non_exhaustive()
    }
}

/// Reducer for the todo view
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoViewReducer;

impl TodoViewReducer {
    /// Create a new reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run a mutation against `store` and turn the outcome into an event.
    async fn execute(store: &dyn TodoStore, request: TodoRequest) -> TodoViewAction {
        let result = match &request {
            TodoRequest::Create { title } => store
                .create(CreateTodoInput::new(title.clone()))
                .await
                .map(|todo| TodoViewAction::TodoCreated { todo }),
            TodoRequest::SetStatus { id, completed } => store
                .update_status(UpdateTodoStatusInput {
                    id: *id,
                    completed: *completed,
                })
                .await
                .map(|todo| TodoViewAction::TodoUpdated { todo }),
            TodoRequest::Delete { id } => store
                .delete(DeleteTodoInput { id: *id })
                .await
                .map(|result| TodoViewAction::TodoDeleted {
                    id: *id,
                    success: result.success,
                }),
        };

        result.unwrap_or_else(|error| TodoViewAction::RequestFailed { request, error })
    }

    /// Send a mutation to whichever store the current mode selects.
    fn dispatch(
        mode: ViewMode,
        request: TodoRequest,
        env: &TodoViewEnvironment,
    ) -> SmallVec<[Effect<TodoViewAction>; 4]> {
        let store: Arc<dyn TodoStore> = match mode {
            ViewMode::Degraded => env.local.clone(),
            ViewMode::Loading | ViewMode::Ready => Arc::clone(&env.remote),
        };
        smallvec![Effect::future(async move {
            Some(Self::execute(store.as_ref(), request).await)
        })]
    }

    /// Switch to local data for the rest of the session.
    fn degrade(state: &mut TodoViewState) {
        state.mode = ViewMode::Degraded;
        state.backend_error = Some(BACKEND_UNAVAILABLE.to_string());
    }

    fn validate_title(title: &str) -> Result<String, TodoError> {
        let input = CreateTodoInput::new(title.trim());
        input.validate()?;
        Ok(input.title)
    }

    fn validate_toggle(state: &TodoViewState, id: TodoId) -> Result<bool, TodoError> {
        state
            .find(id)
            .map(|todo| !todo.completed)
            .ok_or(TodoError::NotFound { id })
    }

    fn upsert(state: &mut TodoViewState, todo: Todo) {
        if let Some(existing) = state.todos.iter_mut().find(|t| t.id == todo.id) {
            *existing = todo;
        } else {
            state.todos.push(todo);
        }
        sort_newest_first(&mut state.todos);
    }

    fn remove(state: &mut TodoViewState, id: TodoId) {
        state.todos.retain(|t| t.id != id);
    }
}

impl Reducer for TodoViewReducer {
    type State = TodoViewState;
    type Action = TodoViewAction;
    type Environment = TodoViewEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TodoViewAction::Load => {
                state.mode = ViewMode::Loading;
                state.backend_error = None;
                state.last_error = None;
                state.creating = false;

                let remote = Arc::clone(&env.remote);
                smallvec![Effect::future(async move {
                    Some(match remote.list().await {
                        Ok(todos) => TodoViewAction::TodosLoaded { todos },
                        Err(error) => TodoViewAction::LoadFailed { error },
                    })
                })]
            },

            TodoViewAction::CreateTodo { title } => match Self::validate_title(&title) {
                Ok(title) => {
                    state.creating = true;
                    state.last_error = None;
                    Self::dispatch(state.mode, TodoRequest::Create { title }, env)
                },
                Err(error) => {
                    state.last_error = Some(error.to_string());
                    SmallVec::new()
                },
            },

            TodoViewAction::ToggleTodo { id } => match Self::validate_toggle(state, id) {
                Ok(completed) => {
                    state.last_error = None;
                    Self::dispatch(state.mode, TodoRequest::SetStatus { id, completed }, env)
                },
                Err(error) => {
                    state.last_error = Some(error.to_string());
                    SmallVec::new()
                },
            },

            TodoViewAction::DeleteTodo { id } => {
                state.last_error = None;
                Self::dispatch(state.mode, TodoRequest::Delete { id }, env)
            },

            // ========== Events ==========
            TodoViewAction::TodosLoaded { mut todos } => {
                sort_newest_first(&mut todos);
                state.todos = todos;
                state.mode = ViewMode::Ready;
                state.backend_error = None;
                SmallVec::new()
            },

            TodoViewAction::LoadFailed { error } => {
                tracing::warn!(error = %error, "Failed to load todos, using demo data");
                Self::degrade(state);
                state.todos = demo_todos();

                let local = Arc::clone(&env.local);
                let seed = state.todos.clone();
                smallvec![Effect::future(async move {
                    local.seed(seed);
                    None
                })]
            },

            TodoViewAction::TodoCreated { todo } => {
                state.creating = false;
                Self::upsert(state, todo);
                SmallVec::new()
            },

            TodoViewAction::TodoUpdated { todo } => {
                Self::upsert(state, todo);
                SmallVec::new()
            },

            TodoViewAction::TodoDeleted { id, success } => {
                // Removed even when `success` is false: the server has no such record either.
                if !success {
                    tracing::debug!(%id, "Delete matched nothing, dropping stale entry");
                }
                Self::remove(state, id);
                SmallVec::new()
            },

            TodoViewAction::RequestFailed { request, error } => {
                if error.is_transport() && state.mode != ViewMode::Degraded {
                    tracing::warn!(error = %error, ?request, "Backend unavailable, switching to local data");
                    Self::degrade(state);

                    let local = Arc::clone(&env.local);
                    let seed = state.todos.clone();
                    return smallvec![Effect::future(async move {
                        local.seed(seed);
                        Some(Self::execute(local.as_ref(), request).await)
                    })];
                }

                state.last_error = Some(error.to_string());
                match request {
                    TodoRequest::Create { .. } => state.creating = false,
                    TodoRequest::SetStatus { id, .. } | TodoRequest::Delete { id } => {
                        if matches!(error, TodoError::NotFound { .. }) {
                            Self::remove(state, id);
                        }
                    },
                }
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use todo_manager_core::environment::Clock;
    use todo_manager_testing::reducer_test::{assertions, run_effects};
    use todo_manager_testing::{InMemoryTodoStore, ReducerTest, test_clock};

    fn env_with(remote: &InMemoryTodoStore) -> TodoViewEnvironment {
        TodoViewEnvironment::new(
            Arc::new(remote.clone()),
            Arc::new(LocalTodoStore::new(Arc::new(test_clock()))),
        )
    }

    fn ready_state(todos: Vec<Todo>) -> TodoViewState {
        TodoViewState {
            todos,
            mode: ViewMode::Ready,
            ..TodoViewState::new()
        }
    }

    fn todo(id: i32, title: &str) -> Todo {
        Todo::new(TodoId::new(id), title, test_clock().now())
    }

    #[test]
    fn test_blank_title_is_rejected_without_effects() {
        ReducerTest::new(TodoViewReducer::new())
            .with_env(env_with(&InMemoryTodoStore::new()))
            .given_state(ready_state(vec![]))
            .when_action(TodoViewAction::CreateTodo {
                title: "   ".to_string(),
            })
            .then_state(|state| {
                assert_eq!(
                    state.last_error.as_deref(),
                    Some("Validation failed: Todo title cannot be empty")
                );
                assert!(!state.creating);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_toggle_of_unknown_todo_records_error() {
        ReducerTest::new(TodoViewReducer::new())
            .with_env(env_with(&InMemoryTodoStore::new()))
            .given_state(ready_state(vec![todo(1, "a")]))
            .when_action(TodoViewAction::ToggleTodo { id: TodoId::new(9) })
            .then_state(|state| {
                assert_eq!(
                    state.last_error.as_deref(),
                    Some("Todo with id 9 not found")
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[tokio::test]
    async fn test_load_success_becomes_ready() {
        let remote = InMemoryTodoStore::new();
        remote.insert("Remote", false, test_clock().now());

        let (_, effects) = ReducerTest::new(TodoViewReducer::new())
            .with_env(env_with(&remote))
            .given_state(TodoViewState::new())
            .when_action(TodoViewAction::Load)
            .then_state(|state| assert!(state.is_loading()))
            .then_effects(assertions::assert_has_future_effect)
            .run();

        let actions = run_effects(effects).await;
        assert!(matches!(
            actions.as_slice(),
            [TodoViewAction::TodosLoaded { todos }] if todos.len() == 1
        ));
    }

    #[test]
    fn test_load_failure_degrades_to_demo_data() {
        ReducerTest::new(TodoViewReducer::new())
            .with_env(env_with(&InMemoryTodoStore::unavailable()))
            .given_state(TodoViewState::new())
            .when_action(TodoViewAction::LoadFailed {
                error: TodoError::Unavailable("connection refused".to_string()),
            })
            .then_state(|state| {
                assert!(state.using_local_data());
                assert_eq!(state.todos, demo_todos());
                assert_eq!(state.backend_error.as_deref(), Some(BACKEND_UNAVAILABLE));
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .run();
    }

    #[tokio::test]
    async fn test_transport_failure_replays_locally() {
        let remote = InMemoryTodoStore::unavailable();
        let env = env_with(&remote);
        let local = Arc::clone(&env.local);

        let (state, effects) = ReducerTest::new(TodoViewReducer::new())
            .with_env(env)
            .given_state(ready_state(vec![todo(5, "Existing")]))
            .when_action(TodoViewAction::RequestFailed {
                request: TodoRequest::Create {
                    title: "New".to_string(),
                },
                error: TodoError::Unavailable("connection refused".to_string()),
            })
            .then_state(|state| {
                assert_eq!(state.mode, ViewMode::Degraded);
                assert!(state.last_error.is_none());
            })
            .run();
        assert!(state.using_local_data());

        let actions = run_effects(effects).await;
        let [TodoViewAction::TodoCreated { todo }] = actions.as_slice() else {
            panic!("expected a local create, got {actions:?}");
        };
        assert_eq!(todo.id, TodoId::new(6));
        assert_eq!(local.snapshot().len(), 2);
        assert_eq!(remote.calls(), 0);
    }

    #[test]
    fn test_not_found_drops_stale_entry() {
        ReducerTest::new(TodoViewReducer::new())
            .with_env(env_with(&InMemoryTodoStore::new()))
            .given_state(ready_state(vec![todo(1, "a"), todo(2, "b")]))
            .when_action(TodoViewAction::RequestFailed {
                request: TodoRequest::SetStatus {
                    id: TodoId::new(2),
                    completed: true,
                },
                error: TodoError::NotFound { id: TodoId::new(2) },
            })
            .then_state(|state| {
                assert_eq!(state.mode, ViewMode::Ready);
                assert_eq!(state.todos.len(), 1);
                assert_eq!(
                    state.last_error.as_deref(),
                    Some("Todo with id 2 not found")
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_created_todo_is_listed_first() {
        let mut newer = todo(7, "newer");
        newer.created_at += chrono::Duration::seconds(1);

        ReducerTest::new(TodoViewReducer::new())
            .with_env(env_with(&InMemoryTodoStore::new()))
            .given_state(TodoViewState {
                creating: true,
                ..ready_state(vec![todo(1, "older")])
            })
            .when_action(TodoViewAction::TodoCreated { todo: newer })
            .then_state(|state| {
                assert!(!state.creating);
                assert_eq!(state.todos[0].title, "newer");
            })
            .run();
    }

    #[test]
    fn test_unsuccessful_delete_still_removes_entry() {
        ReducerTest::new(TodoViewReducer::new())
            .with_env(env_with(&InMemoryTodoStore::new()))
            .given_state(ready_state(vec![todo(1, "a")]))
            .when_action(TodoViewAction::TodoDeleted {
                id: TodoId::new(1),
                success: false,
            })
            .then_state(|state| assert!(state.todos.is_empty()))
            .run();
    }
}
