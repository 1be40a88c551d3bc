//! Character Service - Finalizing a character draft
//!
//! Committing a draft synchronizes it into the live variable store and, only
//! when that succeeds, produces the narrative prompt for the opening scene.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use super::character_sync::{CharacterSyncService, SyncError, SyncSummary, WriteMode};
use super::narrative::build_character_prompt;
use crate::application::ports::outbound::{Notification, NotificationPort, RandomPort};
use crate::domain::entities::CharacterDraft;
use crate::domain::value_objects::roll_reincarnation_points;

/// What a successful commit produced
#[derive(Debug, Clone, Serialize)]
pub struct CommitOutcome {
    pub mode: WriteMode,
    pub summary: SyncSummary,
    pub prompt: String,
}

pub struct CharacterService {
    sync: CharacterSyncService,
    random: Arc<dyn RandomPort>,
    notifier: Arc<dyn NotificationPort>,
}

impl CharacterService {
    pub fn new(
        sync: CharacterSyncService,
        random: Arc<dyn RandomPort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            sync,
            random,
            notifier,
        }
    }

    /// Synchronize the draft, then build its prompt
    #[instrument(skip(self, draft), fields(character = %draft.character.name))]
    pub async fn commit(&self, draft: &CharacterDraft) -> Result<CommitOutcome, SyncError> {
        let summary = match self.sync.sync(draft).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "Character commit aborted");
                self.notifier
                    .notify(Notification::error(format!("写入角色数据失败：{}", e)));
                return Err(e);
            }
        };

        let prompt = build_character_prompt(draft);
        info!(prompt_len = prompt.len(), "Character committed");
        Ok(CommitOutcome {
            mode: self.sync.mode(),
            summary,
            prompt,
        })
    }

    pub fn prompt(&self, draft: &CharacterDraft) -> String {
        build_character_prompt(draft)
    }

    /// Reincarnation score for a character with this name
    pub fn roll_reincarnation(&self, name: &str) -> u32 {
        roll_reincarnation_points(name, self.random.random_f64())
    }
}
