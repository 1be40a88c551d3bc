//! Character Sync Service - Reconciles the live store with the character draft
//!
//! One pass makes the store's skill, inventory and ally sections exactly
//! equal to the curated entries of the draft and recomputes the currency
//! totals from currency items. The pass waits for the store to be ready,
//! detects its schema version, plans the ordered operations and hands them
//! to the configured write strategy.

mod detector;
mod plan;
mod record;
mod script;
mod strategy;

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

pub use detector::SchemaVersionDetector;
pub use plan::{SyncPlan, SyncSummary};
pub use record::{ally_record, item_record, skill_record, NO_TOKEN, YES_TOKEN};
pub use script::{render_op, render_script, ScriptBuilder};
pub use strategy::{strategy_for, DirectWriteStrategy, ScriptWriteStrategy, WriteStrategy};

use crate::application::ports::outbound::{VariableStoreError, VariableStorePort};
use crate::domain::entities::CharacterDraft;
use crate::domain::value_objects::{VariablePathError, VariableTree};

/// How section mutations reach the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Mutate a fetched snapshot and replace the store with it
    Direct,
    /// Submit a command script to the store's interpreter
    Script,
}

impl FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(WriteMode::Direct),
            "script" => Ok(WriteMode::Script),
            other => Err(format!("Unknown write mode: {}", other)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Variable store error: {0}")]
    Store(#[from] VariableStoreError),
    #[error("Could not apply operation: {0}")]
    Path(#[from] VariablePathError),
    #[error("Interpreter rejected the command script")]
    ScriptRejected,
}

pub struct CharacterSyncService {
    store: Arc<dyn VariableStorePort>,
    strategy: Box<dyn WriteStrategy>,
}

impl CharacterSyncService {
    pub fn new(store: Arc<dyn VariableStorePort>, mode: WriteMode) -> Self {
        Self {
            store,
            strategy: strategy_for(mode),
        }
    }

    pub fn mode(&self) -> WriteMode {
        self.strategy.mode()
    }

    /// Run one full-replacement pass for `draft`
    #[instrument(skip(self, draft), fields(mode = ?self.strategy.mode()))]
    pub async fn sync(&self, draft: &CharacterDraft) -> Result<SyncSummary, SyncError> {
        self.store.wait_ready().await;

        let version = SchemaVersionDetector::detect(self.store.as_ref()).await?;
        let snapshot = self.store.snapshot().await?;
        let plan = SyncPlan::build(&VariableTree::new(snapshot.clone()), version, draft);

        self.strategy
            .commit(self.store.as_ref(), snapshot, &plan.ops)
            .await?;

        info!(
            %version,
            skills = plan.summary.skills,
            items = plan.summary.items,
            allies = plan.summary.allies,
            "Character synchronized to variable store"
        );
        Ok(plan.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Ally, CharacterConfig, Item, Skill};
    use crate::domain::value_objects::Rarity;
    use crate::infrastructure::variables::InMemoryVariableStore;
    use serde_json::json;
    use std::time::Duration;

    fn draft() -> CharacterDraft {
        let mut skill = Skill::new("疾风步", Rarity::Rare, "主动");
        skill.entry.effect = "闪避提升".to_string();
        let mut gold = Item::new("钱袋", Rarity::Common, "货币");
        gold.entry.description = "12金币".to_string();
        let mut change = Item::new("零钱", Rarity::Common, "货币");
        change.entry.description = "3金币8银币".to_string();

        CharacterDraft {
            character: CharacterConfig {
                destiny_points: 2,
                ..Default::default()
            },
            skills: vec![skill],
            items: vec![Item::new("面包", Rarity::Common, "食物"), gold, change],
            partners: vec![Ally::new("莉娅", "精灵")],
            ..Default::default()
        }
    }

    fn v2_store() -> Arc<InMemoryVariableStore> {
        Arc::new(InMemoryVariableStore::ready(json!({
            "角色": {"技能列表": {"旧技能": {"品质": "普通"}}, "姓名": "艾琳"},
            "背包": {"旧物品": {}},
            "货币": {"金币": 999, "银币": 1, "铜币": 1},
            "命定系统": {"命定之人": {"旧伙伴": {}}, "命运点数": 0},
            "世界": {"时间": "清晨"}
        })))
    }

    async fn assert_fully_replaced(store: &InMemoryVariableStore) {
        let data = store.snapshot().await.unwrap();
        let skills = data["角色"]["技能列表"].as_object().unwrap();
        assert_eq!(skills.keys().collect::<Vec<_>>(), vec!["疾风步"]);
        assert_eq!(skills["疾风步"]["品质"], "稀有");
        assert_eq!(data["背包"].as_object().unwrap().keys().collect::<Vec<_>>(), vec!["面包"]);
        assert_eq!(data["货币"], json!({"金币": 15, "银币": 8, "铜币": 0}));
        let allies = data["命定系统"]["命定之人"].as_object().unwrap();
        assert_eq!(allies.keys().collect::<Vec<_>>(), vec!["莉娅"]);
        assert_eq!(data["命定系统"]["命运点数"], 2);
        // Unmanaged data survives
        assert_eq!(data["世界"]["时间"], "清晨");
        assert_eq!(data["角色"]["姓名"], "艾琳");
    }

    #[tokio::test]
    async fn test_direct_mode_replaces_sections() {
        let store = v2_store();
        let service = CharacterSyncService::new(store.clone(), WriteMode::Direct);
        let summary = service.sync(&draft()).await.unwrap();
        assert_eq!(summary.version, Some(crate::domain::value_objects::SchemaVersion::V2));
        assert_fully_replaced(&store).await;
        assert_eq!(store.replace_count(), 1);
    }

    #[tokio::test]
    async fn test_script_mode_replaces_sections() {
        let store = v2_store();
        let service = CharacterSyncService::new(store.clone(), WriteMode::Script);
        service.sync(&draft()).await.unwrap();
        assert_fully_replaced(&store).await;
        assert_eq!(store.replace_count(), 1);
    }

    #[tokio::test]
    async fn test_v1_layout_uses_flat_skills_and_asset_currency() {
        let store = Arc::new(InMemoryVariableStore::ready(json!({
            "技能": {"旧技能": {}},
            "资产": {"货币": {"金币": 5}}
        })));
        let service = CharacterSyncService::new(store.clone(), WriteMode::Script);
        let summary = service.sync(&draft()).await.unwrap();
        assert_eq!(summary.version, Some(crate::domain::value_objects::SchemaVersion::V1));

        let data = store.snapshot().await.unwrap();
        assert_eq!(
            data["技能"].as_object().unwrap().keys().collect::<Vec<_>>(),
            vec!["疾风步"]
        );
        assert_eq!(data["资产"]["货币"], json!({"金币": 15, "银币": 8, "铜币": 0}));
        assert!(data.get("货币").is_none());
        assert!(data.get("角色").is_none());
    }

    #[tokio::test]
    async fn test_resync_is_stable() {
        let store = v2_store();
        let service = CharacterSyncService::new(store.clone(), WriteMode::Script);
        service.sync(&draft()).await.unwrap();
        let first = store.snapshot().await.unwrap();
        service.sync(&draft()).await.unwrap();
        assert_eq!(store.snapshot().await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_rejected_script_writes_nothing() {
        let store = v2_store();
        store.set_interpreter_enabled(false);
        let before = store.snapshot().await.unwrap();

        let service = CharacterSyncService::new(store.clone(), WriteMode::Script);
        let result = service.sync(&draft()).await;

        assert!(matches!(result, Err(SyncError::ScriptRejected)));
        assert_eq!(store.snapshot().await.unwrap(), before);
        assert_eq!(store.replace_count(), 0);
    }

    #[tokio::test]
    async fn test_direct_mode_failure_writes_nothing() {
        // A scalar where the ally registry's parent should be
        let store = Arc::new(InMemoryVariableStore::ready(json!({"命定系统": "损坏"})));
        let service = CharacterSyncService::new(store.clone(), WriteMode::Direct);
        let result = service.sync(&draft()).await;
        assert!(matches!(result, Err(SyncError::Path(_))));
        assert_eq!(store.replace_count(), 0);
    }

    #[tokio::test]
    async fn test_sync_waits_for_store_initialization() {
        let store = Arc::new(InMemoryVariableStore::new(json!({})));
        let service = CharacterSyncService::new(store.clone(), WriteMode::Direct);

        let signal = store.ready_signal();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            signal.mark_ready();
        });

        let summary = tokio::time::timeout(Duration::from_secs(2), service.sync(&draft()))
            .await
            .expect("sync should resume once the store is ready")
            .unwrap();
        assert_eq!(summary.skills, 1);
        assert!(store.ready_signal().is_ready());
    }

    #[tokio::test]
    async fn test_scenario_old_skill_replaced() {
        let store = Arc::new(InMemoryVariableStore::ready(json!({
            "角色": {"技能列表": {"旧技能": {"品质": "普通"}}}
        })));
        let draft = CharacterDraft {
            skills: vec![Skill::new("疾风步", Rarity::Rare, "主动")],
            ..Default::default()
        };
        for mode in [WriteMode::Direct, WriteMode::Script] {
            let service = CharacterSyncService::new(store.clone(), mode);
            service.sync(&draft).await.unwrap();
            let data = store.snapshot().await.unwrap();
            let skills = data["角色"]["技能列表"].as_object().unwrap();
            assert_eq!(skills.len(), 1);
            assert!(skills.contains_key("疾风步"));
        }
    }

    #[test]
    fn test_write_mode_parsing() {
        assert_eq!("direct".parse::<WriteMode>(), Ok(WriteMode::Direct));
        assert_eq!(" Script ".parse::<WriteMode>(), Ok(WriteMode::Script));
        assert!("batch".parse::<WriteMode>().is_err());
    }
}
