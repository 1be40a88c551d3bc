//! Legacy preset migration
//!
//! Presets saved before the attribute pool split carry no `basePoints`
//! field, and their `attributePoints` include five points the old formula
//! granted implicitly. Migration removes those five points and adds an
//! all-zero `basePoints` pool for the player to re-spend.

use crate::domain::entities::{AttributeBlock, CharacterPreset, PresetCharacter};

/// Points the old formula over-counted
pub const LEGACY_POINT_OFFSET: i32 = 5;

/// Only a payload without the `basePoints` key is legacy; a stored null is not
pub fn needs_migration(character: &PresetCharacter) -> bool {
    character.base_points.is_none()
}

/// Upgrade a preset's character payload; current presets pass through unchanged
pub fn migrate_preset(mut preset: CharacterPreset) -> CharacterPreset {
    preset.character = migrate_character(preset.character);
    preset
}

pub fn migrate_character(mut character: PresetCharacter) -> PresetCharacter {
    if !needs_migration(&character) {
        return character;
    }
    if let Some(points) = character.attribute_points.as_mut() {
        deduct_offset(points, LEGACY_POINT_OFFSET);
    }
    character.base_points = Some(Some(AttributeBlock::default()));
    character
}

/// Take one point from each attribute in canonical order, then take what is
/// still owed from whichever attributes have points left. Never goes below zero.
fn deduct_offset(points: &mut AttributeBlock, offset: i32) {
    let mut remaining = offset;

    for value in points.values_mut() {
        if remaining <= 0 {
            break;
        }
        let deduct = (*value).clamp(0, 1);
        *value -= deduct;
        remaining -= deduct;
    }

    for value in points.values_mut() {
        if remaining <= 0 {
            break;
        }
        let deduct = (*value).clamp(0, remaining);
        *value -= deduct;
        remaining -= deduct;
    }
}
