//! HTTP client for the todo server's RPC surface.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use todo_manager_core::store::{StoreFuture, TodoStore};
use todo_manager_core::{
    CreateTodoInput, DeleteTodoInput, DeleteTodoResult, Todo, TodoError, TodoId,
    UpdateTodoStatusInput,
};

/// Error body returned by the server
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Remote `TodoStore` speaking JSON over HTTP.
///
/// Failures are classified so the view can tell a dead backend from a
/// rejected request:
///
/// - connection errors, timeouts and 5xx → `Unavailable`
/// - unreadable success bodies → `Decode`
/// - 404 with a `NOT_FOUND` body on a status update → `NotFound`
/// - 400/422 → `Validation`
#[derive(Clone, Debug)]
pub struct HttpTodoClient {
    client: Client,
    base_url: String,
}

impl HttpTodoClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:8080`).
    ///
    /// # Errors
    ///
    /// Returns `TodoError::Unavailable` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TodoError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TodoError::Unavailable(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Server base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, procedure: &str) -> String {
        format!("{}/rpc/{procedure}", self.base_url)
    }

    /// Send a request and decode its body.
    ///
    /// `target` is the todo a 404 refers to, if the procedure has one.
    async fn call<T: DeserializeOwned>(
        request: RequestBuilder,
        target: Option<TodoId>,
    ) -> Result<T, TodoError> {
        let response = request
            .send()
            .await
            .map_err(|e| TodoError::Unavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| TodoError::Decode(e.to_string())),
            status => {
                let body = response.json::<ErrorBody>().await.ok();
                Err(classify(status, body, target))
            },
        }
    }
}

fn classify(status: StatusCode, body: Option<ErrorBody>, target: Option<TodoId>) -> TodoError {
    let not_found = body.as_ref().is_some_and(|b| b.code == "NOT_FOUND");
    let message = body.map_or_else(|| status.to_string(), |b| b.message);
    match (status, target) {
        // A bare 404 is a missing route, not a missing todo.
        (StatusCode::NOT_FOUND, Some(id)) if not_found => TodoError::NotFound { id },
        (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => {
            TodoError::Validation(message)
        },
        (status, _) if status.is_server_error() => TodoError::Unavailable(message),
        (status, _) => TodoError::Decode(format!("unexpected status {status}: {message}")),
    }
}

impl TodoStore for HttpTodoClient {
    fn list(&self) -> StoreFuture<'_, Vec<Todo>> {
        let request = self.client.get(self.url("getTodos"));
        Box::pin(Self::call(request, None))
    }

    fn create(&self, input: CreateTodoInput) -> StoreFuture<'_, Todo> {
        let request = self.client.post(self.url("createTodo")).json(&input);
        Box::pin(Self::call(request, None))
    }

    fn update_status(&self, input: UpdateTodoStatusInput) -> StoreFuture<'_, Todo> {
        let request = self.client.post(self.url("updateTodoStatus")).json(&input);
        Box::pin(Self::call(request, Some(input.id)))
    }

    fn delete(&self, input: DeleteTodoInput) -> StoreFuture<'_, DeleteTodoResult> {
        let request = self.client.post(self.url("deleteTodo")).json(&input);
        Box::pin(Self::call(request, None))
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        let request = self.client.get(format!("{}/ready", self.base_url));
        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| TodoError::Unavailable(e.to_string()))?;
            if response.status().is_success() {
                Ok(())
            } else {
                Err(TodoError::Unavailable(response.status().to_string()))
            }
        })
    }
}
