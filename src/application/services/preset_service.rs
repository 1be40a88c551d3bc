//! Preset Service - Named snapshots of a character draft
//!
//! Every operation reads the whole preset blob through the repository and
//! mutating operations write the whole blob back.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::{
    Notification, NotificationPort, PresetRepositoryError, PresetRepositoryPort,
};
use crate::domain::entities::{CharacterDraft, CharacterPreset, PresetStorage};
use crate::domain::services::{apply_preset, find_matching_preset};

/// Result of a save attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveOutcome {
    Created,
    Overwritten,
    /// The name exists and overwrite was not requested
    Rejected,
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        !matches!(self, SaveOutcome::Rejected)
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub struct PresetService {
    repository: Arc<dyn PresetRepositoryPort>,
    notifier: Arc<dyn NotificationPort>,
}

impl PresetService {
    pub fn new(
        repository: Arc<dyn PresetRepositoryPort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub(crate) fn notifier(&self) -> &Arc<dyn NotificationPort> {
        &self.notifier
    }

    /// All presets, most recently updated first
    pub async fn list(&self) -> Result<Vec<CharacterPreset>, PresetRepositoryError> {
        let mut presets = self.repository.load().await?.presets;
        presets.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(presets)
    }

    pub async fn has_presets(&self) -> Result<bool, PresetRepositoryError> {
        Ok(!self.repository.load().await?.presets.is_empty())
    }

    pub async fn exists(&self, name: &str) -> Result<bool, PresetRepositoryError> {
        Ok(self.repository.load().await?.contains(name))
    }

    pub async fn get(&self, name: &str) -> Result<Option<CharacterPreset>, PresetRepositoryError> {
        Ok(self.repository.load().await?.find(name).cloned())
    }

    /// Snapshot the draft under `name`; both timestamps are now
    pub fn create_preset(name: impl Into<String>, draft: &CharacterDraft) -> CharacterPreset {
        CharacterPreset::from_draft(name, draft, now_millis())
    }

    /// Insert or update a preset.
    ///
    /// A new preset gets fresh timestamps. Overwriting keeps the given
    /// preset's `createdAt` and refreshes `updatedAt`. The saved preset
    /// becomes the last used one.
    #[instrument(skip(self, preset), fields(preset = %preset.name))]
    pub async fn save(
        &self,
        mut preset: CharacterPreset,
        overwrite: bool,
    ) -> Result<SaveOutcome, PresetRepositoryError> {
        let mut storage = self.repository.load().await?;
        let now = now_millis();

        let outcome = match storage.position(&preset.name) {
            Some(_) if !overwrite => {
                self.notifier
                    .notify(Notification::warning(format!("预设「{}」已存在", preset.name)));
                return Ok(SaveOutcome::Rejected);
            }
            Some(index) => {
                preset.updated_at = now;
                storage.presets[index] = preset.clone();
                SaveOutcome::Overwritten
            }
            None => {
                preset.created_at = now;
                preset.updated_at = now;
                storage.presets.push(preset.clone());
                SaveOutcome::Created
            }
        };

        storage.last_used_preset = Some(preset.name.clone());
        self.repository.store(&storage).await?;

        let message = match outcome {
            SaveOutcome::Overwritten => format!("预设「{}」已更新", preset.name),
            _ => format!("预设「{}」已保存", preset.name),
        };
        self.notifier.notify(Notification::success(message));
        info!(?outcome, "Preset saved");
        Ok(outcome)
    }

    /// Remove a preset; `false` when no preset has that name
    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<bool, PresetRepositoryError> {
        let mut storage = self.repository.load().await?;
        let Some(index) = storage.position(name) else {
            self.notifier
                .notify(Notification::error(format!("预设「{}」不存在", name)));
            return Ok(false);
        };

        storage.presets.remove(index);
        if storage.last_used_preset.as_deref() == Some(name) {
            storage.last_used_preset = None;
        }
        self.repository.store(&storage).await?;

        self.notifier
            .notify(Notification::info(format!("预设「{}」已删除", name)));
        info!("Preset deleted");
        Ok(true)
    }

    pub async fn last_used(&self) -> Result<Option<String>, PresetRepositoryError> {
        Ok(self.repository.load().await?.last_used_preset)
    }

    pub async fn set_last_used(&self, name: &str) -> Result<(), PresetRepositoryError> {
        let mut storage = self.repository.load().await?;
        storage.last_used_preset = Some(name.to_string());
        self.repository.store(&storage).await
    }

    /// The draft a stored preset describes, migrated if needed.
    /// Marks the preset as last used.
    #[instrument(skip(self))]
    pub async fn apply(&self, name: &str) -> Result<Option<CharacterDraft>, PresetRepositoryError> {
        let mut storage = self.repository.load().await?;
        let Some(preset) = storage.find(name) else {
            self.notifier
                .notify(Notification::error(format!("预设「{}」不存在", name)));
            return Ok(None);
        };

        let draft = apply_preset(preset);
        storage.last_used_preset = Some(name.to_string());
        self.repository.store(&storage).await?;

        self.notifier
            .notify(Notification::success(format!("已加载预设「{}」", name)));
        debug!(skills = draft.skills.len(), items = draft.items.len(), "Preset applied");
        Ok(Some(draft))
    }

    /// Name of the first listed preset whose content equals the draft
    pub async fn find_matching(
        &self,
        draft: &CharacterDraft,
    ) -> Result<Option<String>, PresetRepositoryError> {
        let presets = self.list().await?;
        Ok(find_matching_preset(&presets, draft).map(|preset| preset.name.clone()))
    }

    pub(crate) async fn load_storage(&self) -> Result<PresetStorage, PresetRepositoryError> {
        self.repository.load().await
    }
}
