//! Value objects - Immutable objects defined by their attributes

mod currency;
mod progression;
mod rarity;
mod schema_version;
mod store_op;
mod variable_tree;

pub use currency::{CurrencyAmount, CURRENCY_ITEM_TYPE};
pub use progression::{
    assignable_points_for_level, display_value, roll_reincarnation_points, tier_attribute_bonus,
    tier_name, BASE_STAT, CUSTOM_SENTINEL, INITIAL_REINCARNATION_POINTS, MAX_LEVEL, MIN_LEVEL,
};
pub use rarity::{ally_tier_cost, ally_tier_costs, CostRange, Rarity, ALLY_TOTAL_TIERS};
pub use schema_version::{SchemaVersion, StoreLayout, V2_MARKER_PATH};
pub use store_op::StoreOp;
pub use variable_tree::{VariablePathError, VariableTree};
