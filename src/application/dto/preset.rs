use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::services::{ImportResolution, SaveOutcome};
use crate::domain::entities::CharacterDraft;

#[derive(Debug, Clone, Deserialize)]
pub struct SavePresetRequest {
    pub name: String,
    pub draft: CharacterDraft,
    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SavePresetResponse {
    pub name: String,
    pub outcome: SaveOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetNameDto {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportRequest {
    pub document: Value,
    /// Per-name resolution for conflicting presets
    #[serde(default)]
    pub resolutions: HashMap<String, ImportResolution>,
}
