//! Application configuration

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::application::services::WriteMode;

/// Where the variable store keeps its documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableBackend {
    Sqlite,
    Memory,
}

impl FromStr for VariableBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(VariableBackend::Sqlite),
            "memory" => Ok(VariableBackend::Memory),
            other => Err(format!("Unknown variable backend: {}", other)),
        }
    }
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection string for the variable store
    pub database_url: String,
    /// HTTP server port
    pub server_port: u16,
    pub variable_backend: VariableBackend,
    /// Write strategy for every synchronization pass of this process
    pub write_mode: WriteMode,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://startforge.db?mode=rwc".to_string()),

            server_port: lookup("SERVER_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            variable_backend: lookup("VARIABLE_BACKEND")
                .unwrap_or_else(|| "sqlite".to_string())
                .parse()
                .map_err(|e: String| anyhow!(e))
                .context("VARIABLE_BACKEND must be 'sqlite' or 'memory'")?,

            write_mode: lookup("WRITE_MODE")
                .unwrap_or_else(|| "script".to_string())
                .parse()
                .map_err(|e: String| anyhow!(e))
                .context("WRITE_MODE must be 'direct' or 'script'")?,
        })
    }
}
