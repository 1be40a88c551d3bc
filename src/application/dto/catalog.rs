use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    ally_tier_costs, assignable_points_for_level, tier_attribute_bonus, tier_name, Rarity,
    MAX_LEVEL, MIN_LEVEL,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RarityDto {
    pub rarity: Rarity,
    pub label: &'static str,
    pub min_cost: u32,
    pub max_cost: u32,
}

impl From<Rarity> for RarityDto {
    fn from(rarity: Rarity) -> Self {
        let range = rarity.cost_range();
        Self {
            label: rarity.label(),
            min_cost: range.min,
            max_cost: range.max,
            rarity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDto {
    pub level: u32,
    pub tier: &'static str,
    pub attribute_bonus: i32,
    pub assignable_points: u32,
}

impl LevelDto {
    fn at(level: u32) -> Self {
        Self {
            level,
            tier: tier_name(level),
            attribute_bonus: tier_attribute_bonus(level),
            assignable_points: assignable_points_for_level(level),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogTablesDto {
    pub rarities: Vec<RarityDto>,
    /// Ally recruiting cost by tier, tier 1 first
    pub ally_tier_costs: Vec<u32>,
    pub levels: Vec<LevelDto>,
}

impl CatalogTablesDto {
    pub fn current() -> Self {
        Self {
            rarities: Rarity::ALL.into_iter().map(RarityDto::from).collect(),
            ally_tier_costs: ally_tier_costs(),
            levels: (MIN_LEVEL..=MAX_LEVEL).map(LevelDto::at).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReincarnationRollQuery {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReincarnationRollDto {
    pub reincarnation_points: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CostQuery {
    pub rarity: Rarity,
    /// Position inside the tier's range, 0.0 to 1.0
    pub position: Option<f64>,
    /// A cost to check against the tier's range
    pub cost: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostDto {
    pub rarity: Rarity,
    pub cost: u32,
    /// `min-max`
    pub range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_range: Option<bool>,
}

impl CostDto {
    pub fn for_query(query: CostQuery) -> Self {
        let range = query.rarity.cost_range();
        Self {
            cost: query.rarity.cost_at(query.position.unwrap_or(0.5)),
            range: format!("{}-{}", range.min, range.max),
            within_range: query.cost.map(|cost| query.rarity.accepts_cost(cost)),
            rarity: query.rarity,
        }
    }
}
