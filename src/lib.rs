//! Formosa Locator: resolves Taiwan place names in free-text chat messages.

pub mod config;
pub mod intent;
pub mod location;
pub mod server;
