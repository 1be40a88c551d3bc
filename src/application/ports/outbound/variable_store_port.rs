//! Variable store port - Interface to the external persistent variable store
//!
//! The store holds live game state as one JSON document per scope. The
//! application only needs whole-document read/replace, an interpreter for
//! command scripts, and a readiness signal; the path primitives are derived
//! from those as read-modify-write operations.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::value_objects::{VariablePathError, VariableTree};

#[derive(Debug, thiserror::Error)]
pub enum VariableStoreError {
    #[error("Store backend error: {0}")]
    Backend(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid path operation: {0}")]
    Path(#[from] VariablePathError),
}

#[async_trait]
pub trait VariableStorePort: Send + Sync {
    /// Suspend until the store has finished initializing
    async fn wait_ready(&self);

    /// Current document
    async fn snapshot(&self) -> Result<Value, VariableStoreError>;

    /// Atomically replace the whole document
    async fn replace_all(&self, snapshot: Value) -> Result<(), VariableStoreError>;

    /// Execute a command script against `snapshot`.
    ///
    /// Returns the resulting document, or `None` when the interpreter
    /// rejects the script. Never writes to the store.
    async fn run_script(
        &self,
        script: &str,
        snapshot: &Value,
    ) -> Result<Option<Value>, VariableStoreError>;

    /// Value at `path`, `None` when absent
    async fn get(&self, path: &str) -> Result<Option<Value>, VariableStoreError> {
        let tree = VariableTree::new(self.snapshot().await?);
        Ok(tree.get(path).cloned())
    }

    async fn get_or(&self, path: &str, default: Value) -> Result<Value, VariableStoreError> {
        Ok(self.get(path).await?.unwrap_or(default))
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), VariableStoreError> {
        let mut tree = VariableTree::new(self.snapshot().await?);
        tree.set(path, value)?;
        self.replace_all(tree.into_inner()).await
    }

    async fn insert(&self, path: &str, key: &str, value: Value) -> Result<(), VariableStoreError> {
        let mut tree = VariableTree::new(self.snapshot().await?);
        tree.insert(path, key, value)?;
        self.replace_all(tree.into_inner()).await
    }

    /// Remove `key` under `path`; returns whether anything was removed
    async fn delete(&self, path: &str, key: &str) -> Result<bool, VariableStoreError> {
        let mut tree = VariableTree::new(self.snapshot().await?);
        let removed = tree.delete(path, key)?;
        if removed {
            self.replace_all(tree.into_inner()).await?;
        }
        Ok(removed)
    }

    async fn add(&self, path: &str, delta: i64) -> Result<(), VariableStoreError> {
        let mut tree = VariableTree::new(self.snapshot().await?);
        tree.add(path, delta)?;
        self.replace_all(tree.into_inner()).await
    }
}
