//! External conversational-agent client abstraction.
//!
//! The agent platform maintains its own conversational memory keyed by the
//! session id, so the same id must be reused across turns of one
//! conversation. The gateway's persisted transcript is independent of that.

pub mod http;
pub mod mock;

use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio_stream::{Stream, StreamExt};

/// Error type for agent invocations. Never retried locally; the caller
/// surfaces it as a terminal failure for the request.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Agent not configured: {0}")]
    NotConfigured(String),

    #[error("Agent API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed agent payload: {0}")]
    Payload(String),
}

/// One event from the agent's completion stream. Not every event carries
/// text; trace and bookkeeping events arrive without a payload.
#[derive(Debug, Clone, Default)]
pub struct AgentChunk {
    pub bytes: Option<Vec<u8>>,
}

/// Type alias for agent completion streams.
pub type AgentStream = Pin<Box<dyn Stream<Item = Result<AgentChunk, AgentError>> + Send>>;

/// Client for the managed conversational agent. Agent and alias identity are
/// construction-time configuration so tests can substitute fakes.
#[async_trait]
pub trait AgentClient: Send + Sync {
    async fn invoke(&self, session_id: &str, input_text: &str)
        -> Result<AgentStream, AgentError>;
}

/// Assemble the streamed completion into one reply: payload bytes are
/// concatenated in emission order, payload-less events are skipped, and the
/// result is UTF-8 decoded once at the end. An empty stream yields an empty
/// reply, not an error.
pub async fn collect_reply(mut stream: AgentStream) -> Result<String, AgentError> {
    let mut buf = Vec::new();
    while let Some(chunk) = stream.next().await {
        if let Some(bytes) = chunk?.bytes {
            buf.extend_from_slice(&bytes);
        }
    }
    String::from_utf8(buf).map_err(|e| AgentError::Payload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_of(chunks: Vec<Result<AgentChunk, AgentError>>) -> AgentStream {
        Box::pin(tokio_stream::iter(chunks))
    }

    #[tokio::test]
    async fn concatenates_payloads_in_emission_order() {
        let stream = stream_of(vec![
            Ok(AgentChunk {
                bytes: Some(b"He".to_vec()),
            }),
            Ok(AgentChunk { bytes: None }),
            Ok(AgentChunk {
                bytes: Some(b"llo!".to_vec()),
            }),
        ]);
        assert_eq!(collect_reply(stream).await.unwrap(), "Hello!");
    }

    #[tokio::test]
    async fn empty_stream_yields_empty_reply() {
        let stream = stream_of(Vec::new());
        assert_eq!(collect_reply(stream).await.unwrap(), "");
    }

    #[tokio::test]
    async fn payload_less_stream_yields_empty_reply() {
        let stream = stream_of(vec![Ok(AgentChunk { bytes: None })]);
        assert_eq!(collect_reply(stream).await.unwrap(), "");
    }

    #[tokio::test]
    async fn multibyte_text_split_across_chunks_decodes() {
        // "é" split mid-codepoint between two chunks.
        let stream = stream_of(vec![
            Ok(AgentChunk {
                bytes: Some(vec![0xc3]),
            }),
            Ok(AgentChunk {
                bytes: Some(vec![0xa9]),
            }),
        ]);
        assert_eq!(collect_reply(stream).await.unwrap(), "é");
    }

    #[tokio::test]
    async fn transport_error_propagates() {
        let stream = stream_of(vec![
            Ok(AgentChunk {
                bytes: Some(b"partial".to_vec()),
            }),
            Err(AgentError::Network("stream reset".to_string())),
        ]);
        let err = collect_reply(stream).await.unwrap_err();
        assert!(matches!(err, AgentError::Network(_)));
    }

    #[tokio::test]
    async fn invalid_utf8_is_a_payload_error() {
        let stream = stream_of(vec![Ok(AgentChunk {
            bytes: Some(vec![0xff, 0xfe]),
        })]);
        let err = collect_reply(stream).await.unwrap_err();
        assert!(matches!(err, AgentError::Payload(_)));
    }
}
