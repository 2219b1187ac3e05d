//! chat-gateway-service: HTTP gateway in front of a managed conversational
//! agent platform, persisting per-session transcripts, plus two stateless
//! practice-content action groups.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod services;
pub mod startup;
