//! Service layer: agent client, session store, content pools.

pub mod agent;
pub mod content;
pub mod store;
