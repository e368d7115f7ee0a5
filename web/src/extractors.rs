//! Custom Axum extractors.
//!
//! - `RpcInput`: JSON procedure input whose rejections use the RPC error body
//! - `CorrelationId`: the request correlation id set by the middleware

use crate::error::AppError;
use crate::middleware::CORRELATION_ID_HEADER;
use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// JSON input of a remote procedure.
///
/// Behaves like [`Json`], but a malformed body is answered with the same
/// `{code, message}` shape as every other RPC failure.
#[derive(Debug, Clone, Copy)]
pub struct RpcInput<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for RpcInput<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::bad_request(rejection.body_text())),
        }
    }
}

/// Correlation ID for request tracing.
///
/// Read from request extensions when the correlation middleware ran, otherwise
/// from the `X-Correlation-ID` header, otherwise freshly generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Self>() {
            return Ok(*id);
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Input {
        title: String,
    }

    fn json_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_rpc_input_parses_json() {
        let RpcInput(input) = RpcInput::<Input>::from_request(json_request(r#"{"title":"a"}"#), &())
            .await
            .unwrap();
        assert_eq!(input.title, "a");
    }

    #[tokio::test]
    async fn test_rpc_input_rejects_malformed_body() {
        let err = RpcInput::<Input>::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "BAD_REQUEST");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_correlation_id_from_header() {
        let id = Uuid::new_v4();
        let (mut parts, ()) = axum::http::Request::builder()
            .header(CORRELATION_ID_HEADER, id.to_string())
            .body(())
            .unwrap()
            .into_parts();
        let extracted = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(extracted, CorrelationId(id));
    }
}
