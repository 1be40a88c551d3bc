use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::application::ports::outbound::{
    PresetRepositoryError, PresetRepositoryPort, VariableStorePort,
};
use crate::domain::entities::{CharacterPreset, PresetStorage};

/// Key of the preset blob inside the character-scope variables
pub const PRESET_STORAGE_KEY: &str = "start_presets";

/// Keeps the whole preset collection as one value in a variable store
pub struct VariablePresetRepository {
    store: Arc<dyn VariableStorePort>,
}

impl VariablePresetRepository {
    pub fn new(store: Arc<dyn VariableStorePort>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PresetRepositoryPort for VariablePresetRepository {
    async fn load(&self) -> Result<PresetStorage, PresetRepositoryError> {
        self.store.wait_ready().await;

        let blob = match self.store.get(PRESET_STORAGE_KEY).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return Ok(PresetStorage::default()),
            Err(e) => {
                warn!(error = %e, "Could not read preset storage, using empty storage");
                return Ok(PresetStorage::default());
            }
        };

        // Only a blob with a `presets` list counts as storage
        let Some(entries) = blob.get("presets").and_then(Value::as_array) else {
            warn!("Preset storage has no preset list, using empty storage");
            return Ok(PresetStorage::default());
        };

        let mut storage = PresetStorage {
            last_used_preset: blob
                .get("lastUsedPreset")
                .and_then(Value::as_str)
                .map(str::to_owned),
            ..Default::default()
        };
        for (index, entry) in entries.iter().enumerate() {
            match serde_json::from_value::<CharacterPreset>(entry.clone()) {
                Ok(preset) => storage.presets.push(preset),
                Err(e) => {
                    warn!(
                        index,
                        name = ?entry.get("name").and_then(serde_json::Value::as_str),
                        error = %e,
                        "Skipping malformed preset"
                    );
                    storage.unparsed.push(entry.clone());
                }
            }
        }
        Ok(storage)
    }

    async fn store(&self, storage: &PresetStorage) -> Result<(), PresetRepositoryError> {
        self.store.wait_ready().await;

        let mut blob = serde_json::to_value(storage)
            .map_err(|e| PresetRepositoryError::Serialization(e.to_string()))?;
        // A parsed preset with the same name replaces the unparsed entry
        let kept = storage.unparsed.iter().filter(|entry| {
            !entry
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| storage.contains(name))
        });
        if let Some(presets) = blob.get_mut("presets").and_then(Value::as_array_mut) {
            presets.extend(kept.cloned());
        }
        self.store
            .set(PRESET_STORAGE_KEY, blob)
            .await
            .map_err(|e| PresetRepositoryError::Store(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CharacterDraft;
    use crate::infrastructure::variables::InMemoryVariableStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_blob_loads_empty() {
        let repo = VariablePresetRepository::new(Arc::new(InMemoryVariableStore::ready(json!({}))));
        assert_eq!(repo.load().await.unwrap(), PresetStorage::default());
    }

    #[tokio::test]
    async fn test_malformed_blob_loads_empty() {
        for blob in [json!("garbage"), json!({"presets": "nope"}), json!({"presets": [1, 2]})] {
            let store = InMemoryVariableStore::ready(json!({ PRESET_STORAGE_KEY: blob }));
            let repo = VariablePresetRepository::new(Arc::new(store));
            assert!(repo.load().await.unwrap().presets.is_empty());
        }
    }

    #[tokio::test]
    async fn test_store_then_load_keeps_other_variables() {
        let store = Arc::new(InMemoryVariableStore::ready(json!({"其他": true})));
        let repo = VariablePresetRepository::new(store.clone());
        let storage = PresetStorage {
            presets: vec![CharacterPreset::from_draft("A", &CharacterDraft::default(), 5)],
            last_used_preset: Some("A".to_string()),
            ..Default::default()
        };

        repo.store(&storage).await.unwrap();

        assert_eq!(repo.load().await.unwrap(), storage);
        let data = store.snapshot().await.unwrap();
        assert_eq!(data["其他"], true);
        assert_eq!(data[PRESET_STORAGE_KEY]["lastUsedPreset"], "A");
    }

    #[tokio::test]
    async fn test_malformed_preset_is_kept_next_to_good_ones() {
        let good = CharacterPreset::from_draft("A", &CharacterDraft::default(), 5);
        let broken = json!({"name": "B", "character": {"age": "二十"}});
        let store = Arc::new(InMemoryVariableStore::ready(json!({
            PRESET_STORAGE_KEY: {
                "presets": [serde_json::to_value(&good).unwrap(), broken.clone()],
                "lastUsedPreset": "B"
            }
        })));
        let repo = VariablePresetRepository::new(store.clone());

        let mut storage = repo.load().await.unwrap();
        assert_eq!(storage.presets, vec![good]);
        assert_eq!(storage.unparsed, vec![broken.clone()]);
        assert_eq!(storage.last_used_preset.as_deref(), Some("B"));

        storage
            .presets
            .push(CharacterPreset::from_draft("C", &CharacterDraft::default(), 6));
        repo.store(&storage).await.unwrap();

        let data = store.snapshot().await.unwrap();
        let names: Vec<&str> = data[PRESET_STORAGE_KEY]["presets"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["name"].as_str())
            .collect();
        assert_eq!(names, vec!["A", "C", "B"]);
        assert_eq!(data[PRESET_STORAGE_KEY]["presets"][2], broken);
    }

    #[tokio::test]
    async fn test_parsed_preset_replaces_unparsed_entry_of_same_name() {
        let store = Arc::new(InMemoryVariableStore::ready(json!({
            PRESET_STORAGE_KEY: {"presets": [{"name": "B", "character": {"age": "二十"}}]}
        })));
        let repo = VariablePresetRepository::new(store.clone());

        let mut storage = repo.load().await.unwrap();
        storage
            .presets
            .push(CharacterPreset::from_draft("B", &CharacterDraft::default(), 7));
        repo.store(&storage).await.unwrap();

        let reloaded = repo.load().await.unwrap();
        assert_eq!(reloaded.presets.len(), 1);
        assert!(reloaded.unparsed.is_empty());
    }
}
