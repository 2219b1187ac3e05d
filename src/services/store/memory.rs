//! In-memory session store used by tests and local development.

use super::{SessionStore, StoreError};
use crate::models::SessionRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub struct MemoryStore {
    records: Mutex<HashMap<String, SessionRecord>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            fail_writes: false,
        }
    }

    /// Store whose writes always fail, for exercising the persistence error
    /// path after a successful agent call.
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            fail_writes: true,
        }
    }

    pub fn record(&self, session_id: &str) -> Option<SessionRecord> {
        self.records
            .lock()
            .expect("store lock poisoned")
            .get(session_id)
            .cloned()
    }

    /// Seed a record directly, bypassing the write-failure toggle.
    pub fn insert(&self, record: SessionRecord) {
        self.records
            .lock()
            .expect("store lock poisoned")
            .insert(record.session_id.clone(), record);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, session_id: &str) -> Result<Option<SessionRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .expect("store lock poisoned")
            .get(session_id)
            .cloned())
    }

    async fn put(&self, record: &SessionRecord) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Backend(anyhow::anyhow!(
                "simulated write failure"
            )));
        }
        self.records
            .lock()
            .expect("store lock poisoned")
            .insert(record.session_id.clone(), record.clone());
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
