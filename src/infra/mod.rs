//! Infrastructure adapters: the HTTP client for the remote configuration
//! service, the settings file, and log-backed notifications.

pub mod adapters;
pub mod config;
