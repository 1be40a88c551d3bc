//! Write strategies - how a planned pass reaches the store

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::script::ScriptBuilder;
use super::{SyncError, WriteMode};
use crate::application::ports::outbound::VariableStorePort;
use crate::domain::value_objects::{StoreOp, VariableTree};

#[async_trait]
pub trait WriteStrategy: Send + Sync {
    fn mode(&self) -> WriteMode;

    /// Bring the store from `snapshot` to the state described by `ops`
    async fn commit(
        &self,
        store: &dyn VariableStorePort,
        snapshot: Value,
        ops: &[StoreOp],
    ) -> Result<(), SyncError>;
}

pub fn strategy_for(mode: WriteMode) -> Box<dyn WriteStrategy> {
    match mode {
        WriteMode::Direct => Box::new(DirectWriteStrategy),
        WriteMode::Script => Box::new(ScriptWriteStrategy),
    }
}

/// Apply every operation to the fetched snapshot in memory, then replace
/// the store with the result in one call
pub struct DirectWriteStrategy;

#[async_trait]
impl WriteStrategy for DirectWriteStrategy {
    fn mode(&self) -> WriteMode {
        WriteMode::Direct
    }

    async fn commit(
        &self,
        store: &dyn VariableStorePort,
        snapshot: Value,
        ops: &[StoreOp],
    ) -> Result<(), SyncError> {
        let mut tree = VariableTree::new(snapshot);
        for op in ops {
            tree.apply(op)?;
        }
        debug!(operations = ops.len(), "Replacing store with mutated snapshot");
        store.replace_all(tree.into_inner()).await?;
        Ok(())
    }
}

/// Render the operations as one script, let the store's interpreter run it
/// against the snapshot, and replace the store with what it returns
pub struct ScriptWriteStrategy;

#[async_trait]
impl WriteStrategy for ScriptWriteStrategy {
    fn mode(&self) -> WriteMode {
        WriteMode::Script
    }

    async fn commit(
        &self,
        store: &dyn VariableStorePort,
        snapshot: Value,
        ops: &[StoreOp],
    ) -> Result<(), SyncError> {
        let mut builder = ScriptBuilder::new();
        builder.extend(ops.iter().cloned());
        let script = builder.render();
        debug!(operations = ops.len(), bytes = script.len(), "Submitting command script");

        match store.run_script(&script, &snapshot).await? {
            Some(result) => {
                store.replace_all(result).await?;
                Ok(())
            }
            None => {
                warn!("Interpreter rejected the command script; nothing written");
                Err(SyncError::ScriptRejected)
            }
        }
    }
}
