//! Session transcript persistence.
//!
//! The store is a key-value collaborator: `get` by session id and `put` as a
//! full-record overwrite. No locking, no conditional writes — concurrent
//! turns on one session race last-writer-wins.

pub mod memory;
pub mod mongo;

use crate::models::{SessionRecord, Turn};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(anyhow::Error),

    #[error("Record serialization error: {0}")]
    Serialization(anyhow::Error),
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Result<Option<SessionRecord>, StoreError>;

    /// Unconditionally replaces any record stored under the same session id.
    async fn put(&self, record: &SessionRecord) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Read the transcript for `session_id` (an absent record means an empty
/// one), append `turn`, and write the whole record back with refreshed
/// metadata. Returns the new history. A write failure propagates even
/// though the agent call already succeeded.
pub async fn append_turn(
    store: &dyn SessionStore,
    session_id: &str,
    turn: Turn,
    email: &str,
    lang: &str,
    now: &str,
) -> Result<Vec<Turn>, StoreError> {
    let mut history = store
        .get(session_id)
        .await?
        .map(|record| record.conversation_history)
        .unwrap_or_default();

    history.push(turn);

    let record = SessionRecord {
        session_id: session_id.to_string(),
        conversation_history: history,
        email: email.to_string(),
        last_updated: now.to_string(),
        language: lang.to_string(),
    };
    store.put(&record).await?;

    Ok(record.conversation_history)
}
