//! The conversation-session gateway.
//!
//! One request is one strictly sequential pass: normalize the inbound
//! envelope, invoke the agent and assemble its streamed reply, append the
//! exchange to the persisted transcript, respond. A failure at any step
//! becomes the formatted error response; nothing is retried.

use crate::error::AppError;
use crate::models::{session::now_timestamp, Turn};
use crate::services::agent::{collect_reply, AgentClient};
use crate::services::store::append_turn;
use crate::startup::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

/// Session id assumed when the caller supplies none.
pub const DEFAULT_SESSION_ID: &str = "default-session";
/// Locale tag assumed when the caller supplies none.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Normalized inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
    pub lang: String,
    pub email: String,
}

/// Parse the inbound envelope. The front end sends either the payload object
/// directly, a string-encoded JSON document, or either of those wrapped
/// under a `body` field (the shape the original deployment forwarded).
pub fn normalize_envelope(raw: &str) -> Result<ChatRequest, AppError> {
    let parsed: Value = serde_json::from_str(raw)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid request body: {}", e)))?;
    let body = unwrap_body(parsed)?;

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();
    if message.is_empty() {
        return Err(AppError::EmptyMessage);
    }

    Ok(ChatRequest {
        message,
        session_id: non_empty_or(&body, "sessionId", DEFAULT_SESSION_ID),
        lang: body
            .get("lang")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_string(),
        email: body
            .get("email")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

fn unwrap_body(envelope: Value) -> Result<Value, AppError> {
    let body = match envelope {
        Value::Object(mut map) if map.contains_key("body") => {
            map.remove("body").unwrap_or(Value::Null)
        }
        other => other,
    };
    match body {
        // A string-encoded body is parsed a second time.
        Value::String(inner) => serde_json::from_str(&inner)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid request body: {}", e))),
        other => Ok(other),
    }
}

fn non_empty_or(body: &Value, field: &str, default: &str) -> String {
    match body.get(field).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}

/// POST /chat — one conversational turn.
pub async fn converse(State(state): State<AppState>, raw: String) -> Result<Response, AppError> {
    let request = normalize_envelope(&raw)?;

    tracing::info!(
        session_id = %request.session_id,
        lang = %request.lang,
        message_len = request.message.len(),
        "Incoming chat message"
    );

    let stream = state
        .agent
        .invoke(&request.session_id, &request.message)
        .await?;
    let reply = collect_reply(stream).await?;

    tracing::debug!(
        session_id = %request.session_id,
        reply_len = reply.len(),
        "Agent reply assembled"
    );

    // One `now` per request: the turn timestamp and lastUpdated must match.
    let now = now_timestamp();
    let turn = Turn {
        timestamp: now.clone(),
        user: request.message.clone(),
        agent: reply.clone(),
        language: request.lang.clone(),
    };
    let history = append_turn(
        state.store.as_ref(),
        &request.session_id,
        turn,
        &request.email,
        &request.lang,
        &now,
    )
    .await?;

    tracing::info!(
        session_id = %request.session_id,
        history_len = history.len(),
        "Turn persisted"
    );

    let mut response = (
        StatusCode::OK,
        Json(json!({ "response": reply, "sessionId": request.session_id })),
    )
        .into_response();
    apply_cors(response.headers_mut());
    Ok(response)
}

/// OPTIONS /chat — CORS preflight.
pub async fn preflight() -> Response {
    let mut response = StatusCode::OK.into_response();
    apply_cors(response.headers_mut());
    response
}

/// Full CORS header set for the success path. Error responses carry only the
/// origin header (see `error.rs`).
pub fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_message_and_applies_defaults() {
        let request = normalize_envelope(r#"{"message": "  Hello there  "}"#).unwrap();
        assert_eq!(request.message, "Hello there");
        assert_eq!(request.session_id, DEFAULT_SESSION_ID);
        assert_eq!(request.lang, DEFAULT_LANGUAGE);
        assert_eq!(request.email, "");
    }

    #[test]
    fn preserves_supplied_fields_verbatim() {
        let request = normalize_envelope(
            r#"{"message": "Hi", "sessionId": "s1", "lang": "hi-IN", "email": "u@example.com"}"#,
        )
        .unwrap();
        assert_eq!(request.session_id, "s1");
        assert_eq!(request.lang, "hi-IN");
        assert_eq!(request.email, "u@example.com");
    }

    #[test]
    fn empty_session_id_falls_back_to_sentinel() {
        let request = normalize_envelope(r#"{"message": "Hi", "sessionId": ""}"#).unwrap();
        assert_eq!(request.session_id, DEFAULT_SESSION_ID);
    }

    #[test]
    fn empty_message_is_a_validation_error() {
        let err = normalize_envelope(r#"{"message": ""}"#).unwrap_err();
        assert!(matches!(err, AppError::EmptyMessage));
    }

    #[test]
    fn whitespace_only_message_is_a_validation_error() {
        let err = normalize_envelope(r#"{"message": "   "}"#).unwrap_err();
        assert!(matches!(err, AppError::EmptyMessage));
    }

    #[test]
    fn missing_message_is_a_validation_error() {
        let err = normalize_envelope(r#"{"sessionId": "s1"}"#).unwrap_err();
        assert!(matches!(err, AppError::EmptyMessage));
    }

    #[test]
    fn unwraps_string_encoded_body_field() {
        let request = normalize_envelope(
            r#"{"body": "{\"message\": \"Hi\", \"sessionId\": \"s2\"}"}"#,
        )
        .unwrap();
        assert_eq!(request.message, "Hi");
        assert_eq!(request.session_id, "s2");
    }

    #[test]
    fn unwraps_object_body_field() {
        let request =
            normalize_envelope(r#"{"body": {"message": "Hi", "lang": "ta-IN"}}"#).unwrap();
        assert_eq!(request.lang, "ta-IN");
    }

    #[test]
    fn accepts_string_encoded_top_level_document() {
        let request =
            normalize_envelope(r#""{\"message\": \"Hi\"}""#).unwrap();
        assert_eq!(request.message, "Hi");
    }

    #[test]
    fn malformed_json_is_an_internal_error() {
        let err = normalize_envelope("not json").unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
