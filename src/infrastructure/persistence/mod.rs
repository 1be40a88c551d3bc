//! Persistence adapters

mod preset_repository;

pub use preset_repository::{VariablePresetRepository, PRESET_STORAGE_KEY};
