use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use devnews_engine::FETCH_FAILED;
use serde_json::json;
use thiserror::Error;

/// Failures of the news route. Each one becomes a `500` with a JSON envelope.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Required configuration (the API key) is absent.
    #[error("{0}")]
    MissingConfig(String),
    /// The upstream call failed or returned something that is not JSON.
    #[error("{0}")]
    Upstream(String),
}

impl ProxyError {
    pub fn message(&self) -> &str {
        let message = match self {
            ProxyError::MissingConfig(message) | ProxyError::Upstream(message) => message.trim(),
        };
        if message.is_empty() {
            FETCH_FAILED
        } else {
            message
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = json!({ "status": "error", "message": self.message() });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
