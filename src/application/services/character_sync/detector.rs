//! Schema version detection
//!
//! Classification is redone on every pass; the store's shape can change
//! between releases of whatever writes it.

use serde_json::Value;

use crate::application::ports::outbound::{VariableStoreError, VariableStorePort};
use crate::domain::value_objects::{SchemaVersion, V2_MARKER_PATH};

pub struct SchemaVersionDetector;

impl SchemaVersionDetector {
    /// V2 when the nested skills list exists with a non-null value, V1 otherwise
    pub async fn detect(store: &dyn VariableStorePort) -> Result<SchemaVersion, VariableStoreError> {
        let marker = store.get(V2_MARKER_PATH).await?;
        Ok(Self::classify(marker.as_ref()))
    }

    pub fn classify(marker: Option<&Value>) -> SchemaVersion {
        match marker {
            Some(value) if !value.is_null() => SchemaVersion::V2,
            _ => SchemaVersion::V1,
        }
    }
}
