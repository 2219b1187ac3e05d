pub mod actions;
pub mod chat;
pub mod health;
