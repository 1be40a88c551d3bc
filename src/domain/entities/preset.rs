//! Character presets - named snapshots of a character draft

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Ally, Background, CharacterConfig, Equipment, Item, PresetCharacter, Skill};

/// Live character-creation state: the configuration plus every selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDraft {
    #[serde(default)]
    pub character: CharacterConfig,
    #[serde(default)]
    pub equipments: Vec<Equipment>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub partners: Vec<Ally>,
    #[serde(default)]
    pub background: Option<Background>,
}

/// A named, timestamped snapshot. The name is the identity key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterPreset {
    pub name: String,
    /// Epoch milliseconds
    #[serde(default)]
    pub created_at: i64,
    /// Epoch milliseconds
    #[serde(default)]
    pub updated_at: i64,
    pub character: PresetCharacter,
    #[serde(default)]
    pub equipments: Vec<Equipment>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub partners: Vec<Ally>,
    #[serde(default)]
    pub background: Option<Background>,
}

impl CharacterPreset {
    /// Snapshot a draft; derived attribute totals are not part of it
    pub fn from_draft(name: impl Into<String>, draft: &CharacterDraft, now: i64) -> Self {
        Self {
            name: name.into(),
            created_at: now,
            updated_at: now,
            character: PresetCharacter::from(&draft.character),
            equipments: draft.equipments.clone(),
            items: draft.items.clone(),
            skills: draft.skills.clone(),
            partners: draft.partners.clone(),
            background: draft.background.clone(),
        }
    }

    /// Whether the draft holds exactly this preset's content, timestamps aside
    pub fn matches_draft(&self, draft: &CharacterDraft) -> bool {
        self.character == PresetCharacter::from(&draft.character)
            && self.equipments == draft.equipments
            && self.items == draft.items
            && self.skills == draft.skills
            && self.partners == draft.partners
            && self.background == draft.background
    }

    /// Same content ignoring `createdAt` / `updatedAt`
    pub fn same_content(&self, other: &CharacterPreset) -> bool {
        self.name == other.name
            && self.character == other.character
            && self.equipments == other.equipments
            && self.items == other.items
            && self.skills == other.skills
            && self.partners == other.partners
            && self.background == other.background
    }
}

/// Everything persisted for presets; always read and written whole
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetStorage {
    #[serde(default)]
    pub presets: Vec<CharacterPreset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_preset: Option<String>,
    /// Stored entries that did not parse as a preset, written back untouched
    #[serde(skip)]
    pub unparsed: Vec<Value>,
}

impl PresetStorage {
    pub fn find(&self, name: &str) -> Option<&CharacterPreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.presets.iter().position(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Rarity;

    fn sample_draft() -> CharacterDraft {
        CharacterDraft {
            character: CharacterConfig {
                name: "艾琳".to_string(),
                ..Default::default()
            },
            skills: vec![Skill::new("疾风步", Rarity::Rare, "主动")],
            ..Default::default()
        }
    }

    #[test]
    fn test_preset_matches_its_source_draft() {
        let draft = sample_draft();
        let preset = CharacterPreset::from_draft("A", &draft, 10);
        assert!(preset.matches_draft(&draft));

        let mut changed = draft.clone();
        changed.character.money = 99;
        assert!(!preset.matches_draft(&changed));
    }

    #[test]
    fn test_same_content_ignores_timestamps() {
        let draft = sample_draft();
        let a = CharacterPreset::from_draft("A", &draft, 10);
        let b = CharacterPreset::from_draft("A", &draft, 20);
        assert!(a.same_content(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_storage_lookup_is_case_sensitive() {
        let storage = PresetStorage {
            presets: vec![CharacterPreset::from_draft("Alpha", &sample_draft(), 1)],
            ..Default::default()
        };
        assert!(storage.contains("Alpha"));
        assert!(!storage.contains("alpha"));
        assert_eq!(storage.position("Alpha"), Some(0));
    }
}
