//! Structural mutations against the external variable store

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One path-addressed mutation.
///
/// A synchronization pass is an ordered list of these; they are either
/// applied directly to a fetched snapshot or rendered to a command script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum StoreOp {
    /// Replace the value at `path`
    Set { path: String, value: Value },
    /// Remove `key` from the object at `path`
    Delete { path: String, key: String },
    /// Add `key` to the object at `path`
    Insert {
        path: String,
        key: String,
        value: Value,
    },
    /// Add `delta` to the number at `path`
    Add { path: String, delta: i64 },
}

impl StoreOp {
    pub fn set(path: impl Into<String>, value: impl Into<Value>) -> Self {
        StoreOp::Set {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn delete(path: impl Into<String>, key: impl Into<String>) -> Self {
        StoreOp::Delete {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn insert(path: impl Into<String>, key: impl Into<String>, value: impl Into<Value>) -> Self {
        StoreOp::Insert {
            path: path.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn add(path: impl Into<String>, delta: i64) -> Self {
        StoreOp::Add {
            path: path.into(),
            delta,
        }
    }
}
