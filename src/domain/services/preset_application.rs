//! Turning presets back into editable drafts

use super::legacy_migration::migrate_preset;
use crate::domain::entities::{CharacterConfig, CharacterDraft, CharacterPreset};

/// Build the draft a preset describes.
///
/// Starts from default state, upgrades legacy payloads, copies every
/// character field the payload carries, then appends all selections.
pub fn apply_preset(preset: &CharacterPreset) -> CharacterDraft {
    let migrated = migrate_preset(preset.clone());

    let mut character = CharacterConfig::default();
    character.apply_snapshot(&migrated.character);

    CharacterDraft {
        character,
        equipments: migrated.equipments,
        items: migrated.items,
        skills: migrated.skills,
        partners: migrated.partners,
        background: migrated.background,
    }
}

/// Whether the draft is exactly what applying `preset` would produce
pub fn preset_matches(preset: &CharacterPreset, draft: &CharacterDraft) -> bool {
    preset.matches_draft(draft) || migrate_preset(preset.clone()).matches_draft(draft)
}

/// First preset, in the given order, whose content equals the draft
pub fn find_matching_preset<'a>(
    presets: &'a [CharacterPreset],
    draft: &CharacterDraft,
) -> Option<&'a CharacterPreset> {
    presets.iter().find(|preset| preset_matches(preset, draft))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AttributeBlock, Background, Item, PresetCharacter, Skill};
    use crate::domain::value_objects::{Rarity, INITIAL_REINCARNATION_POINTS};

    fn legacy_preset() -> CharacterPreset {
        CharacterPreset {
            name: "旧".to_string(),
            created_at: 1,
            updated_at: 1,
            character: PresetCharacter {
                name: Some("凯".to_string()),
                level: Some(3),
                attribute_points: Some(AttributeBlock::uniform(5)),
                ..Default::default()
            },
            equipments: Vec::new(),
            items: vec![Item::new("面包", Rarity::Common, "食物")],
            skills: vec![Skill::new("疾风步", Rarity::Rare, "主动")],
            partners: Vec::new(),
            background: Some(Background::new("流浪者", "无家可归")),
        }
    }

    #[test]
    fn test_apply_migrates_and_keeps_defaults_for_absent_fields() {
        let draft = apply_preset(&legacy_preset());
        assert_eq!(draft.character.name, "凯");
        assert_eq!(draft.character.level, 3);
        assert_eq!(draft.character.attribute_points, AttributeBlock::uniform(4));
        assert_eq!(draft.character.base_points, AttributeBlock::default());
        assert_eq!(draft.character.age, 18);
        assert_eq!(draft.character.reincarnation_points, INITIAL_REINCARNATION_POINTS);
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.skills[0].entry.name, "疾风步");
        assert_eq!(draft.background.as_ref().map(|b| b.name.as_str()), Some("流浪者"));
    }

    #[test]
    fn test_applied_draft_matches_its_preset() {
        let preset = legacy_preset();
        let draft = apply_preset(&preset);
        // Fields the legacy payload lacks are filled by defaults, so only a
        // preset saved from this draft is an exact match
        let saved = CharacterPreset::from_draft("新", &draft, 2);
        assert!(preset_matches(&saved, &draft));

        let mut edited = draft.clone();
        edited.character.money += 1;
        assert!(!preset_matches(&saved, &edited));
    }

    #[test]
    fn test_find_matching_returns_first_in_order() {
        let draft = CharacterDraft::default();
        let a = CharacterPreset::from_draft("A", &draft, 1);
        let b = CharacterPreset::from_draft("B", &draft, 2);
        let presets = vec![b, a];
        assert_eq!(
            find_matching_preset(&presets, &draft).map(|p| p.name.as_str()),
            Some("B")
        );
        assert!(find_matching_preset(&presets[..0], &draft).is_none());
    }
}
