//! Application startup and lifecycle management.

use crate::config::GatewayConfig;
use crate::error::AppError;
use crate::handlers;
use crate::services::agent::http::{AgentConfig, HttpAgentClient};
use crate::services::agent::AgentClient;
use crate::services::store::{mongo::MongoSessionStore, SessionStore};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state. Collaborators are injected as trait objects so
/// tests can substitute fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub store: Arc<dyn SessionStore>,
    pub agent: Arc<dyn AgentClient>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route(
            "/chat",
            post(handlers::chat::converse).options(handlers::chat::preflight),
        )
        .route(
            "/actions/pronunciation",
            post(handlers::actions::pronunciation),
        )
        .route("/actions/jam-topics", post(handlers::actions::jam_topics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(config: GatewayConfig) -> Result<Self, AppError> {
        let store = MongoSessionStore::connect(&config.mongodb.uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                AppError::Store(e)
            })?;

        store.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize session index: {}", e);
            AppError::Store(e)
        })?;

        let agent: Arc<dyn AgentClient> = Arc::new(HttpAgentClient::new(AgentConfig {
            endpoint: config.agent.endpoint.clone(),
            api_key: config.agent.api_key.clone(),
            agent_id: config.agent.agent_id.clone(),
            agent_alias_id: config.agent.agent_alias_id.clone(),
        }));

        tracing::info!(
            agent_id = %config.agent.agent_id,
            alias_id = %config.agent.agent_alias_id,
            "Initialized agent client"
        );

        let state = AppState {
            config: config.clone(),
            store: Arc::new(store),
            agent,
        };

        let router = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }
}
