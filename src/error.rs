use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::agent::AgentError;
use crate::services::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Rejected before any external call; the 400 body is matched verbatim
    /// by the calling front end.
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Agent invocation failed: {0}")]
    Agent(#[from] AgentError),

    #[error("Persistence failed: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(anyhow::Error),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::EmptyMessage => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Message cannot be empty" }),
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("Internal server error: {}", other) }),
            ),
        };

        let mut response = (status, Json(body)).into_response();
        // Error paths carry only the origin header; the success path adds
        // the full CORS set. The calling front end relies on this asymmetry.
        response.headers_mut().insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_maps_to_exact_400_body() {
        let response = AppError::EmptyMessage.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_METHODS)
                .is_none()
        );
    }

    #[test]
    fn store_failure_maps_to_500() {
        let err = AppError::Store(StoreError::Backend(anyhow::anyhow!("write timed out")));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
