use async_trait::async_trait;

use crate::domain::entities::PresetStorage;

#[derive(Debug, thiserror::Error)]
pub enum PresetRepositoryError {
    #[error("Store error: {0}")]
    Store(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Whole-blob persistence for presets
#[async_trait]
pub trait PresetRepositoryPort: Send + Sync {
    async fn load(&self) -> Result<PresetStorage, PresetRepositoryError>;
    async fn store(&self, storage: &PresetStorage) -> Result<(), PresetRepositoryError>;
}
