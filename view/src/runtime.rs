//! Sequential runtime for the view reducer.
//!
//! The Store owns the state, the reducer and the environment. `send` reduces
//! one action, runs its effects to completion and reduces every action they
//! feed back, in order, before returning. There is a single logical event
//! stream: concurrent `send` calls are serialized.

use std::collections::VecDeque;
use todo_manager_core::effect::Effect;
use todo_manager_core::reducer::Reducer;
use tokio::sync::{Mutex, RwLock};

/// The Store - runtime for a reducer
///
/// ```ignore
/// let view = Store::new(TodoViewState::new(), TodoViewReducer::new(), env);
/// view.send(TodoViewAction::Load).await;
/// let count = view.state(|s| s.todos.len()).await;
/// ```
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: RwLock<S>,
    reducer: R,
    environment: E,
    dispatch: Mutex<()>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new store with initial state, reducer, and environment
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self {
            state: RwLock::new(initial_state),
            reducer,
            environment,
            dispatch: Mutex::new(()),
        }
    }

    /// Send an action and run everything it triggers.
    ///
    /// Returns once the action, its effects and all fed-back actions have been
    /// processed.
    #[tracing::instrument(skip_all, name = "store_send")]
    pub async fn send(&self, action: A) {
        let _turn = self.dispatch.lock().await;

        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            let effects = {
                let mut state = self.state.write().await;
                self.reducer.reduce(&mut *state, action, &self.environment)
            };

            for effect in effects {
                match effect {
                    Effect::None => {},
                    Effect::Future(fut) => {
                        if let Some(next) = fut.await {
                            queue.push_back(next);
                        }
                    },
                }
            }
        }
    }

    /// Read current state via a closure
    ///
    /// ```ignore
    /// let pending = view.state(|s| s.stats().pending).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&*state)
    }
}

impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::{SmallVec, smallvec};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Action {
        Start,
        Step(u8),
    }

    struct Chain;

    impl Reducer for Chain {
        type State = Vec<u8>;
        type Action = Action;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Vec<u8>,
            action: Action,
            _env: &(),
        ) -> SmallVec<[Effect<Action>; 4]> {
            match action {
                Action::Start => smallvec![
                    Effect::future(async { Some(Action::Step(1)) }),
                    Effect::None,
                    Effect::future(async { Some(Action::Step(2)) }),
                ],
                Action::Step(n) => {
                    state.push(n);
                    if n == 1 {
                        smallvec![Effect::future(async { Some(Action::Step(3)) })]
                    } else {
                        SmallVec::new()
                    }
                },
            }
        }
    }

    #[tokio::test]
    async fn test_feedback_actions_run_in_order_before_send_returns() {
        let store = Store::new(Vec::new(), Chain, ());
        store.send(Action::Start).await;
        assert_eq!(store.state(Vec::clone).await, vec![1, 2, 3]);
    }
}
