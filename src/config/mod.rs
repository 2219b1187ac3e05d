use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub agent: AgentSettings,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct AgentSettings {
    /// Base URL of the managed agent runtime.
    pub endpoint: String,
    /// Sent as `x-api-key` when non-empty.
    pub api_key: String,
    pub agent_id: String,
    pub agent_alias_id: String,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let server = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(GatewayConfig {
            server,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("chat_gateway_db"), is_prod)?,
            },
            agent: AgentSettings {
                endpoint: get_env(
                    "AGENT_ENDPOINT",
                    Some("https://bedrock-agent-runtime.ap-south-1.amazonaws.com"),
                    is_prod,
                )?,
                api_key: get_env("AGENT_API_KEY", Some(""), is_prod)?,
                agent_id: get_env("AGENT_ID", Some("DHFHEXWIGL"), is_prod)?,
                agent_alias_id: get_env("AGENT_ALIAS_ID", Some("IHDDWCSGOB"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::Config(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::Config(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
