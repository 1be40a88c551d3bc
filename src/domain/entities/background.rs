//! Background - narrative seed for the opening scene

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Only characters of this race may pick the background
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_race: Option<String>,
    /// Only characters starting here may pick the background
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_location: Option<String>,
}

impl Background {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required_race: None,
            required_location: None,
        }
    }

    /// Whether a character with this race and start location may use it.
    ///
    /// A location gate also matches any location nested below it
    /// (`区域-国家` admits `区域-国家-城市`).
    pub fn is_available_for(&self, race: &str, start_location: &str) -> bool {
        let race_ok = self
            .required_race
            .as_deref()
            .map_or(true, |required| required == race);
        let location_ok = self.required_location.as_deref().map_or(true, |required| {
            start_location == required || start_location.starts_with(&format!("{required}-"))
        });
        race_ok && location_ok
    }
}
