//! Data models for the chat gateway.

pub mod session;

pub use session::{SessionRecord, Turn};
