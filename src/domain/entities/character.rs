//! Player character configuration

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::value_objects::{
    display_value, tier_attribute_bonus, BASE_STAT, INITIAL_REINCARNATION_POINTS, MIN_LEVEL,
};

/// The five attributes, keyed by their canonical names in every serialized form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeBlock {
    #[serde(rename = "力量", default)]
    pub strength: i32,
    #[serde(rename = "敏捷", default)]
    pub agility: i32,
    #[serde(rename = "体质", default)]
    pub constitution: i32,
    #[serde(rename = "智力", default)]
    pub intelligence: i32,
    #[serde(rename = "精神", default)]
    pub spirit: i32,
}

impl AttributeBlock {
    pub fn new(strength: i32, agility: i32, constitution: i32, intelligence: i32, spirit: i32) -> Self {
        Self {
            strength,
            agility,
            constitution,
            intelligence,
            spirit,
        }
    }

    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value, value)
    }

    /// Attributes in canonical order: 力量, 敏捷, 体质, 智力, 精神
    pub fn values_mut(&mut self) -> [&mut i32; 5] {
        [
            &mut self.strength,
            &mut self.agility,
            &mut self.constitution,
            &mut self.intelligence,
            &mut self.spirit,
        ]
    }

    pub fn values(&self) -> [i32; 5] {
        [
            self.strength,
            self.agility,
            self.constitution,
            self.intelligence,
            self.spirit,
        ]
    }

    pub fn total(&self) -> i32 {
        self.values().iter().sum()
    }
}

/// Live character configuration edited during creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterConfig {
    pub name: String,
    pub gender: String,
    pub custom_gender: String,
    pub age: u32,
    pub race: String,
    pub custom_race: String,
    pub identity: String,
    pub custom_identity: String,
    pub start_location: String,
    pub custom_start_location: String,
    pub level: u32,
    /// Fixed pool granted by level
    pub base_points: AttributeBlock,
    /// Freely assignable pool
    pub attribute_points: AttributeBlock,
    pub reincarnation_points: u32,
    pub destiny_points: i64,
    pub money: i64,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            gender: String::new(),
            custom_gender: String::new(),
            age: 18,
            race: String::new(),
            custom_race: String::new(),
            identity: String::new(),
            custom_identity: String::new(),
            start_location: String::new(),
            custom_start_location: String::new(),
            level: MIN_LEVEL,
            base_points: AttributeBlock::default(),
            attribute_points: AttributeBlock::default(),
            reincarnation_points: INITIAL_REINCARNATION_POINTS,
            destiny_points: 0,
            money: 0,
        }
    }
}

impl CharacterConfig {
    pub fn display_gender(&self) -> &str {
        display_value(&self.gender, &self.custom_gender)
    }

    pub fn display_race(&self) -> &str {
        display_value(&self.race, &self.custom_race)
    }

    pub fn display_identity(&self) -> &str {
        display_value(&self.identity, &self.custom_identity)
    }

    pub fn display_start_location(&self) -> &str {
        display_value(&self.start_location, &self.custom_start_location)
    }

    /// Derived attribute totals; never persisted
    pub fn attributes(&self) -> AttributeBlock {
        let floor = BASE_STAT + tier_attribute_bonus(self.level);
        let base = self.base_points.values();
        let extra = self.attribute_points.values();
        AttributeBlock::new(
            floor + base[0] + extra[0],
            floor + base[1] + extra[1],
            floor + base[2] + extra[2],
            floor + base[3] + extra[3],
            floor + base[4] + extra[4],
        )
    }

    /// Copy every field present in a preset snapshot onto this config
    pub fn apply_snapshot(&mut self, snapshot: &PresetCharacter) {
        macro_rules! copy_present {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = &snapshot.$field {
                        self.$field = value.clone();
                    }
                )*
            };
        }
        copy_present!(
            name,
            gender,
            custom_gender,
            age,
            race,
            custom_race,
            identity,
            custom_identity,
            start_location,
            custom_start_location,
            level,
            attribute_points,
            reincarnation_points,
            destiny_points,
            money,
        );
        if let Some(Some(points)) = snapshot.base_points {
            self.base_points = points;
        }
    }
}

/// Character payload stored inside a preset.
///
/// Every field is optional: snapshots written by older releases lack
/// fields added since, and applying a snapshot only copies what is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetCharacter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_race: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_identity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_start_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    /// `None` when the key is absent; `Some(None)` when it is stored as null
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_points: Option<Option<AttributeBlock>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_points: Option<AttributeBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reincarnation_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destiny_points: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money: Option<i64>,
}

/// A present key deserializes to `Some`, even when its value is null
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<&CharacterConfig> for PresetCharacter {
    fn from(config: &CharacterConfig) -> Self {
        Self {
            name: Some(config.name.clone()),
            gender: Some(config.gender.clone()),
            custom_gender: Some(config.custom_gender.clone()),
            age: Some(config.age),
            race: Some(config.race.clone()),
            custom_race: Some(config.custom_race.clone()),
            identity: Some(config.identity.clone()),
            custom_identity: Some(config.custom_identity.clone()),
            start_location: Some(config.start_location.clone()),
            custom_start_location: Some(config.custom_start_location.clone()),
            level: Some(config.level),
            base_points: Some(Some(config.base_points)),
            attribute_points: Some(config.attribute_points),
            reincarnation_points: Some(config.reincarnation_points),
            destiny_points: Some(config.destiny_points),
            money: Some(config.money),
        }
    }
}
