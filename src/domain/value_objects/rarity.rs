//! Rarity tiers - quality labels and cost ranges for catalog entries

use serde::{Deserialize, Serialize};

/// Label written for any tier the store does not know
pub const DEFAULT_RARITY_LABEL: &str = "普通";

/// Ordinal quality tier of a catalog entry.
///
/// Serialized as its lowercase code. A code outside the table is kept
/// verbatim so it survives a save and export unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    /// Fixed-cost unique tier
    Only,
    /// Any value outside the known table
    Unknown(String),
}

/// Inclusive cost bounds for one rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostRange {
    pub min: u32,
    pub max: u32,
}

impl Rarity {
    pub const ALL: [Rarity; 7] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
        Rarity::Only,
    ];

    pub fn code(&self) -> &str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::Mythic => "mythic",
            Rarity::Only => "only",
            Rarity::Unknown(code) => code,
        }
    }

    /// Display label used by the external store and the narrative prompt
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "普通",
            Rarity::Uncommon => "优秀",
            Rarity::Rare => "稀有",
            Rarity::Epic => "史诗",
            Rarity::Legendary => "传说",
            Rarity::Mythic => "神话",
            Rarity::Only => "唯一",
            Rarity::Unknown(_) => DEFAULT_RARITY_LABEL,
        }
    }

    pub fn cost_range(&self) -> CostRange {
        let (min, max) = match self {
            Rarity::Common | Rarity::Unknown(_) => (5, 30),
            Rarity::Uncommon => (20, 60),
            Rarity::Rare => (35, 100),
            Rarity::Epic => (80, 200),
            Rarity::Legendary => (150, 400),
            Rarity::Mythic => (300, 1000),
            Rarity::Only => (666, 666),
        };
        CostRange { min, max }
    }

    /// Cost at a relative position inside the tier (0.0 = min, 1.0 = max)
    pub fn cost_at(&self, position: f64) -> u32 {
        let range = self.cost_range();
        let position = position.clamp(0.0, 1.0);
        let cost = range.min as f64 + (range.max - range.min) as f64 * position;
        cost.round() as u32
    }

    pub fn accepts_cost(&self, cost: u32) -> bool {
        let range = self.cost_range();
        cost >= range.min && cost <= range.max
    }
}

impl From<String> for Rarity {
    fn from(code: String) -> Self {
        Rarity::ALL
            .into_iter()
            .find(|rarity| rarity.code() == code)
            .unwrap_or(Rarity::Unknown(code))
    }
}

impl From<Rarity> for String {
    fn from(rarity: Rarity) -> Self {
        match rarity {
            Rarity::Unknown(code) => code,
            known => known.code().to_string(),
        }
    }
}

/// Number of ally tiers
pub const ALLY_TOTAL_TIERS: u32 = 7;

const ALLY_TIER_COSTS: [u32; ALLY_TOTAL_TIERS as usize] = [100, 213, 456, 2678, 4642, 8318, 9999];

/// Cost of recruiting an ally at `tier` (1-based)
pub fn ally_tier_cost(tier: u32) -> Option<u32> {
    if tier == 0 || tier > ALLY_TOTAL_TIERS {
        return None;
    }
    Some(ALLY_TIER_COSTS[(tier - 1) as usize])
}

/// Costs of all ally tiers in order
pub fn ally_tier_costs() -> Vec<u32> {
    ALLY_TIER_COSTS.to_vec()
}
