//! External store schema layouts
//!
//! The live variable store exists in two shapes. V2 nests the skill list
//! under the character record and keeps currency at the top level; V1 keeps
//! skills at the root and currency under the asset record. Both share the
//! inventory and ally registry locations.

use serde::{Deserialize, Serialize};

/// Path that only exists in the V2 layout
pub const V2_MARKER_PATH: &str = "角色.技能列表";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    V1,
    V2,
}

impl SchemaVersion {
    pub fn layout(&self) -> StoreLayout {
        match self {
            SchemaVersion::V1 => StoreLayout {
                skills: "技能",
                inventory: "背包",
                currency: "资产.货币",
                allies: "命定系统.命定之人",
                destiny_points: "命定系统.命运点数",
            },
            SchemaVersion::V2 => StoreLayout {
                skills: V2_MARKER_PATH,
                inventory: "背包",
                currency: "货币",
                allies: "命定系统.命定之人",
                destiny_points: "命定系统.命运点数",
            },
        }
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaVersion::V1 => write!(f, "v1"),
            SchemaVersion::V2 => write!(f, "v2"),
        }
    }
}

/// Paths of the managed sections for one schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLayout {
    pub skills: &'static str,
    pub inventory: &'static str,
    /// Prefix under which `金币`, `银币` and `铜币` live
    pub currency: &'static str,
    pub allies: &'static str,
    pub destiny_points: &'static str,
}

impl StoreLayout {
    pub fn gold(&self) -> String {
        format!("{}.金币", self.currency)
    }

    pub fn silver(&self) -> String {
        format!("{}.银币", self.currency)
    }

    pub fn copper(&self) -> String {
        format!("{}.铜币", self.currency)
    }
}
