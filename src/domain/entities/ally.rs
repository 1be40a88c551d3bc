//! Ally ("destined one") - companion characters recruited at creation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::catalog::Skill;
use crate::domain::value_objects::Rarity;

/// Ally attribute block (English keys in the catalog format)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllyAttributes {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub mind: i32,
}

/// Ascension sub-record; elements only matter once the gate is open
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ascension {
    #[serde(default)]
    pub is_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Map<String, Value>>,
}

/// Maximum number of ascension elements the store accepts
pub const MAX_ASCENSION_ELEMENTS: usize = 3;

/// Equipment carried by an ally; every field may be blank
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AllyEquipment {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub tag: String,
    pub effect: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ally {
    pub name: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
    #[serde(default)]
    pub life_level: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub race: String,
    #[serde(default)]
    pub identity: Vec<String>,
    #[serde(default)]
    pub career: Vec<String>,
    #[serde(default)]
    pub personality: String,
    #[serde(default)]
    pub like: String,
    /// Appearance
    #[serde(default)]
    pub app: String,
    /// Clothing
    #[serde(default)]
    pub cloth: String,
    #[serde(default)]
    pub attributes: AllyAttributes,
    #[serde(default)]
    pub stairway: Ascension,
    #[serde(default)]
    pub is_contract: bool,
    #[serde(default)]
    pub affinity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_info: Option<String>,
    #[serde(default)]
    pub equip: Vec<AllyEquipment>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl Ally {
    pub fn new(name: impl Into<String>, race: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            race: race.into(),
            level: 1,
            ..Default::default()
        }
    }

    /// Equipment entries that carry a name
    pub fn named_equipment(&self) -> impl Iterator<Item = &AllyEquipment> {
        self.equip.iter().filter(|eq| !eq.name.is_empty())
    }

    /// Ascension elements trimmed to the accepted maximum, in insertion order
    pub fn ascension_elements(&self) -> Map<String, Value> {
        self.stairway
            .elements
            .as_ref()
            .map(|elements| {
                elements
                    .iter()
                    .take(MAX_ASCENSION_ELEMENTS)
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
