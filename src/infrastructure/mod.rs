//! Infrastructure layer - External adapters and implementations
//!
//! - Variables: in-memory and SQLite variable stores plus the script interpreter
//! - Persistence: preset blob kept inside the character variables
//! - HTTP: REST API routes
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod http;
pub mod notifier;
pub mod persistence;
pub mod random_adapter;
pub mod state;
pub mod variables;
