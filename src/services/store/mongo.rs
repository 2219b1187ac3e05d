//! MongoDB-backed session store.
//!
//! Uses the driver strictly as the gateway's key-value collaborator:
//! `find_one` by session id and `replace_one` with upsert for the
//! full-record overwrite.

use super::{SessionStore, StoreError};
use crate::models::SessionRecord;
use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReplaceOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};

#[derive(Clone)]
pub struct MongoSessionStore {
    client: MongoClient,
    db: Database,
}

impl MongoSessionStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            StoreError::Backend(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), StoreError> {
        let session_id_index = IndexModel::builder()
            .keys(doc! { "sessionId": 1 })
            .options(
                IndexOptions::builder()
                    .name("session_id_idx".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.sessions()
            .create_index(session_id_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create sessionId index: {}", e);
                StoreError::Backend(anyhow::anyhow!(e.to_string()))
            })?;

        Ok(())
    }

    fn sessions(&self) -> Collection<SessionRecord> {
        self.db.collection("sessions")
    }
}

#[async_trait]
impl SessionStore for MongoSessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<SessionRecord>, StoreError> {
        self.sessions()
            .find_one(doc! { "sessionId": session_id }, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to read session {}: {}", session_id, e);
                StoreError::Backend(anyhow::anyhow!(e.to_string()))
            })
    }

    async fn put(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let options = ReplaceOptions::builder().upsert(true).build();
        self.sessions()
            .replace_one(doc! { "sessionId": &record.session_id }, record, options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to write session {}: {}", record.session_id, e);
                StoreError::Backend(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                StoreError::Backend(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }
}
