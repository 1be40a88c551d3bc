//! Shared application state

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;

use crate::application::ports::outbound::{NotificationPort, VariableStorePort};
use crate::application::services::{
    CharacterService, CharacterSyncService, PresetService, PresetTransferService, WriteMode,
};
use crate::infrastructure::config::{AppConfig, VariableBackend};
use crate::infrastructure::notifier::TracingNotifier;
use crate::infrastructure::persistence::VariablePresetRepository;
use crate::infrastructure::random_adapter::ThreadRngAdapter;
use crate::infrastructure::variables::{
    InMemoryVariableStore, SqliteVariableStore, CHARACTER_SCOPE, MESSAGE_SCOPE,
};

/// Shared application state
pub struct AppState {
    pub preset_service: Arc<PresetService>,
    pub transfer_service: PresetTransferService,
    pub character_service: CharacterService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let (message_store, character_store): (Arc<dyn VariableStorePort>, Arc<dyn VariableStorePort>) =
            match config.variable_backend {
                VariableBackend::Sqlite => {
                    let pool = SqlitePoolOptions::new()
                        .connect(&config.database_url)
                        .await
                        .with_context(|| format!("Failed to open {}", config.database_url))?;
                    let message = SqliteVariableStore::new(pool.clone(), MESSAGE_SCOPE)
                        .await
                        .context("Failed to initialize message variables")?;
                    let character = SqliteVariableStore::new(pool, CHARACTER_SCOPE)
                        .await
                        .context("Failed to initialize character variables")?;
                    (Arc::new(message), Arc::new(character))
                }
                VariableBackend::Memory => (
                    Arc::new(InMemoryVariableStore::ready(Value::Null)),
                    Arc::new(InMemoryVariableStore::ready(Value::Null)),
                ),
            };

        Ok(Self::with_stores(
            message_store,
            character_store,
            config.write_mode,
            Arc::new(TracingNotifier),
        ))
    }

    /// Wire the services over already-built stores
    pub fn with_stores(
        message_store: Arc<dyn VariableStorePort>,
        character_store: Arc<dyn VariableStorePort>,
        write_mode: WriteMode,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        let repository = Arc::new(VariablePresetRepository::new(character_store));
        let preset_service = Arc::new(PresetService::new(repository, notifier.clone()));
        let transfer_service = PresetTransferService::new(preset_service.clone());
        let character_service = CharacterService::new(
            CharacterSyncService::new(message_store, write_mode),
            Arc::new(ThreadRngAdapter::new()),
            notifier,
        );

        Self {
            preset_service,
            transfer_service,
            character_service,
        }
    }
}
