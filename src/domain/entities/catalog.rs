//! Catalog entries - items, skills and equipment
//!
//! Curated entries (`isCustom == false`) come from the catalog and are
//! synchronized into the structured store. Custom entries are player
//! authored and only ever reach the narrative prompt.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Rarity, CURRENCY_ITEM_TYPE};

/// Fields shared by every catalog entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
    #[serde(default)]
    pub is_custom: bool,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            name: name.into(),
            rarity,
            ..Default::default()
        }
    }
}

/// Consumable or inventory item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(rename = "type", default)]
    pub item_type: String,
}

impl Item {
    pub fn new(name: impl Into<String>, rarity: Rarity, item_type: impl Into<String>) -> Self {
        Self {
            entry: CatalogEntry::new(name, rarity),
            quantity: None,
            item_type: item_type.into(),
        }
    }

    pub fn is_currency(&self) -> bool {
        self.item_type == CURRENCY_ITEM_TYPE
    }
}

/// Active or passive skill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consume: Option<String>,
    #[serde(rename = "type", default)]
    pub skill_type: String,
}

impl Skill {
    pub fn new(name: impl Into<String>, rarity: Rarity, skill_type: impl Into<String>) -> Self {
        Self {
            entry: CatalogEntry::new(name, rarity),
            consume: None,
            skill_type: skill_type.into(),
        }
    }
}

/// Wearable equipment; `type` names the slot it occupies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    #[serde(rename = "type", default)]
    pub slot: String,
}

impl Equipment {
    pub fn new(name: impl Into<String>, rarity: Rarity, slot: impl Into<String>) -> Self {
        Self {
            entry: CatalogEntry::new(name, rarity),
            slot: slot.into(),
        }
    }
}
