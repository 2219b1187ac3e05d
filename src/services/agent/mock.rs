//! Scripted agent client for tests.

use super::{AgentChunk, AgentClient, AgentError, AgentStream};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock agent that replays a fixed chunk script on every invocation and
/// counts how many times it was invoked.
pub struct MockAgentClient {
    script: Vec<Option<Vec<u8>>>,
    fail: bool,
    invocations: AtomicUsize,
}

impl MockAgentClient {
    /// Mock that streams the given text fragments, followed by one
    /// payload-less trace-style event.
    pub fn replying(fragments: &[&str]) -> Self {
        let mut script: Vec<Option<Vec<u8>>> = fragments
            .iter()
            .map(|fragment| Some(fragment.as_bytes().to_vec()))
            .collect();
        script.push(None);

        Self {
            script,
            fail: false,
            invocations: AtomicUsize::new(0),
        }
    }

    /// Mock whose invocations always fail at the transport level.
    pub fn failing() -> Self {
        Self {
            script: Vec::new(),
            fail: true,
            invocations: AtomicUsize::new(0),
        }
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AgentClient for MockAgentClient {
    async fn invoke(
        &self,
        _session_id: &str,
        _input_text: &str,
    ) -> Result<AgentStream, AgentError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(AgentError::Network("connection reset by peer".to_string()));
        }

        let chunks: Vec<Result<AgentChunk, AgentError>> = self
            .script
            .iter()
            .cloned()
            .map(|bytes| Ok(AgentChunk { bytes }))
            .collect();

        Ok(Box::pin(tokio_stream::iter(chunks)))
    }
}
