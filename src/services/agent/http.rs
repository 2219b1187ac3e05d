//! HTTP implementation of the agent client.
//!
//! Talks to the managed agent runtime's streaming invoke endpoint. The
//! response is an SSE stream of completion events; text-bearing events carry
//! base64-encoded bytes under `chunk.bytes`, trace events carry none.

use super::{AgentChunk, AgentClient, AgentError, AgentStream};
use async_trait::async_trait;
use base64::Engine;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Agent runtime connection settings.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub endpoint: String,
    pub api_key: String,
    pub agent_id: String,
    pub agent_alias_id: String,
}

pub struct HttpAgentClient {
    config: AgentConfig,
    client: Client,
}

impl HttpAgentClient {
    pub fn new(config: AgentConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn invoke_url(&self, session_id: &str) -> String {
        format!(
            "{}/agents/{}/agentAliases/{}/sessions/{}/text",
            self.config.endpoint, self.config.agent_id, self.config.agent_alias_id, session_id
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InvokeRequest<'a> {
    input_text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionEvent {
    #[serde(default)]
    chunk: Option<ChunkPayload>,
}

#[derive(Debug, Deserialize)]
struct ChunkPayload {
    #[serde(default)]
    bytes: Option<String>,
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn invoke(
        &self,
        session_id: &str,
        input_text: &str,
    ) -> Result<AgentStream, AgentError> {
        let url = self.invoke_url(session_id);

        tracing::debug!(
            agent_id = %self.config.agent_id,
            session_id = %session_id,
            input_len = input_text.len(),
            "Opening agent completion stream"
        );

        let mut request = self.client.post(&url).json(&InvokeRequest { input_text });
        if !self.config.api_key.is_empty() {
            request = request.header("x-api-key", &self.config.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AgentError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(format!(
                "agent runtime returned {}: {}",
                status, error_text
            )));
        }

        // Feed completion events through a channel so the caller sees a
        // plain chunk stream with the SSE framing already removed.
        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk_result) = stream.next().await {
                match chunk_result {
                    Ok(chunk) => {
                        buffer.push_str(&String::from_utf8_lossy(&chunk));

                        // Process complete SSE events
                        while let Some(event_end) = buffer.find("\n\n") {
                            let event = buffer[..event_end].to_string();
                            buffer = buffer[event_end + 2..].to_string();

                            let Some(data) = event.strip_prefix("data: ") else {
                                continue;
                            };
                            match parse_event(data) {
                                Ok(chunk) => {
                                    if tx.send(Ok(chunk)).await.is_err() {
                                        return;
                                    }
                                }
                                Err(e) => {
                                    let _ = tx.send(Err(e)).await;
                                    return;
                                }
                            }
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(AgentError::Network(e.to_string()))).await;
                        return;
                    }
                }
            }
        });

        Ok(Box::pin(ReceiverStream::new(rx)) as AgentStream)
    }
}

fn parse_event(data: &str) -> Result<AgentChunk, AgentError> {
    let event: CompletionEvent =
        serde_json::from_str(data).map_err(|e| AgentError::Payload(e.to_string()))?;

    let bytes = match event.chunk.and_then(|c| c.bytes) {
        Some(encoded) => Some(
            base64::engine::general_purpose::STANDARD
                .decode(encoded.as_bytes())
                .map_err(|e| AgentError::Payload(e.to_string()))?,
        ),
        None => None,
    };

    Ok(AgentChunk { bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_payload_bearing_event() {
        let chunk = parse_event(r#"{"chunk":{"bytes":"SGVsbG8h"}}"#).unwrap();
        assert_eq!(chunk.bytes.unwrap(), b"Hello!");
    }

    #[test]
    fn trace_event_has_no_payload() {
        let chunk = parse_event(r#"{"trace":{"step":"orchestration"}}"#).unwrap();
        assert!(chunk.bytes.is_none());
    }

    #[test]
    fn invalid_base64_is_a_payload_error() {
        let err = parse_event(r#"{"chunk":{"bytes":"not base64!!"}}"#).unwrap_err();
        assert!(matches!(err, AgentError::Payload(_)));
    }

    #[test]
    fn invoke_url_includes_agent_alias_and_session() {
        let client = HttpAgentClient::new(AgentConfig {
            endpoint: "https://agents.example.com".to_string(),
            api_key: String::new(),
            agent_id: "DHFHEXWIGL".to_string(),
            agent_alias_id: "IHDDWCSGOB".to_string(),
        });
        assert_eq!(
            client.invoke_url("s1"),
            "https://agents.example.com/agents/DHFHEXWIGL/agentAliases/IHDDWCSGOB/sessions/s1/text"
        );
    }
}
