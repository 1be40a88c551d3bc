use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{execute_script, ReadySignal};
use crate::application::ports::outbound::{VariableStoreError, VariableStorePort};

/// Process-local variable store for one scope
pub struct InMemoryVariableStore {
    data: RwLock<Value>,
    ready: ReadySignal,
    replaces: AtomicUsize,
    interpreter_enabled: AtomicBool,
}

impl InMemoryVariableStore {
    /// A store that still has to be initialized; callers block until
    /// [`ReadySignal::mark_ready`] is called on its signal
    pub fn new(initial: Value) -> Self {
        Self::with_signal(initial, ReadySignal::pending())
    }

    /// A store that is usable immediately
    pub fn ready(initial: Value) -> Self {
        Self::with_signal(initial, ReadySignal::ready())
    }

    fn with_signal(initial: Value, ready: ReadySignal) -> Self {
        let initial = if initial.is_null() {
            Value::Object(Map::new())
        } else {
            initial
        };
        Self {
            data: RwLock::new(initial),
            ready,
            replaces: AtomicUsize::new(0),
            interpreter_enabled: AtomicBool::new(true),
        }
    }

    pub fn ready_signal(&self) -> ReadySignal {
        self.ready.clone()
    }

    /// Number of whole-document replacements performed so far
    pub fn replace_count(&self) -> usize {
        self.replaces.load(Ordering::SeqCst)
    }

    /// When disabled, every script is rejected as an unavailable
    /// interpreter would
    pub fn set_interpreter_enabled(&self, enabled: bool) {
        self.interpreter_enabled.store(enabled, Ordering::SeqCst);
    }
}

#[async_trait]
impl VariableStorePort for InMemoryVariableStore {
    async fn wait_ready(&self) {
        self.ready.wait().await;
    }

    async fn snapshot(&self) -> Result<Value, VariableStoreError> {
        Ok(self.data.read().await.clone())
    }

    async fn replace_all(&self, snapshot: Value) -> Result<(), VariableStoreError> {
        *self.data.write().await = snapshot;
        self.replaces.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn run_script(
        &self,
        script: &str,
        snapshot: &Value,
    ) -> Result<Option<Value>, VariableStoreError> {
        if !self.interpreter_enabled.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(execute_script(script, snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_path_primitives_round_through_snapshot() {
        let store = InMemoryVariableStore::ready(Value::Null);
        store.set("命定系统.命运点数", json!(3)).await.unwrap();
        store.insert("背包", "面包", json!({"数量": 1})).await.unwrap();
        store.add("货币.金币", 12).await.unwrap();

        assert_eq!(store.get("命定系统.命运点数").await.unwrap(), Some(json!(3)));
        assert_eq!(store.get_or("货币.银币", json!(0)).await.unwrap(), json!(0));
        assert!(store.delete("背包", "面包").await.unwrap());
        assert!(!store.delete("背包", "面包").await.unwrap());
        assert_eq!(store.snapshot().await.unwrap()["货币"]["金币"], 12);
    }

    #[tokio::test]
    async fn test_run_script_does_not_write() {
        let store = InMemoryVariableStore::ready(json!({"a": 1}));
        let result = store
            .run_script("_.set(\"a\", 2);", &json!({"a": 1}))
            .await
            .unwrap();
        assert_eq!(result, Some(json!({"a": 2})));
        assert_eq!(store.snapshot().await.unwrap(), json!({"a": 1}));
        assert_eq!(store.replace_count(), 0);
    }

    #[tokio::test]
    async fn test_disabled_interpreter_rejects() {
        let store = InMemoryVariableStore::ready(json!({}));
        store.set_interpreter_enabled(false);
        assert_eq!(
            store.run_script("_.set(\"a\", 2);", &json!({})).await.unwrap(),
            None
        );
    }
}
