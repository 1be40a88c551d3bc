use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use tracing::warn;

use super::{execute_script, ReadySignal};
use crate::application::ports::outbound::{VariableStoreError, VariableStorePort};

/// Variable store persisted as one JSON row per scope
pub struct SqliteVariableStore {
    pool: SqlitePool,
    scope: String,
    ready: ReadySignal,
}

impl SqliteVariableStore {
    pub async fn new(pool: SqlitePool, scope: impl Into<String>) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS variables (
                scope TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
        "#,
        )
        .execute(&pool)
        .await?;

        let store = Self {
            pool,
            scope: scope.into(),
            ready: ReadySignal::pending(),
        };
        store.ready.mark_ready();
        Ok(store)
    }
}

#[async_trait]
impl VariableStorePort for SqliteVariableStore {
    async fn wait_ready(&self) {
        self.ready.wait().await;
    }

    async fn snapshot(&self) -> Result<Value, VariableStoreError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT data FROM variables WHERE scope = ?")
            .bind(&self.scope)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| VariableStoreError::Backend(e.to_string()))?;

        let Some((data,)) = row else {
            return Ok(Value::Object(Map::new()));
        };
        match serde_json::from_str::<Value>(&data) {
            Ok(Value::Null) => Ok(Value::Object(Map::new())),
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(scope = %self.scope, error = %e, "Stored variables are not valid JSON");
                Err(VariableStoreError::Serialization(e.to_string()))
            }
        }
    }

    async fn replace_all(&self, snapshot: Value) -> Result<(), VariableStoreError> {
        let data = serde_json::to_string(&snapshot)
            .map_err(|e| VariableStoreError::Serialization(e.to_string()))?;

        sqlx::query(
            "INSERT OR REPLACE INTO variables (scope, data, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)",
        )
        .bind(&self.scope)
        .bind(data)
        .execute(&self.pool)
        .await
        .map_err(|e| VariableStoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn run_script(
        &self,
        script: &str,
        snapshot: &Value,
    ) -> Result<Option<Value>, VariableStoreError> {
        Ok(execute_script(script, snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_scope_reads_as_empty_object() {
        let store = SqliteVariableStore::new(pool().await, "message").await.unwrap();
        store.wait_ready().await;
        assert_eq!(store.snapshot().await.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn test_scopes_are_isolated() {
        let pool = pool().await;
        let message = SqliteVariableStore::new(pool.clone(), "message").await.unwrap();
        let character = SqliteVariableStore::new(pool, "character").await.unwrap();

        message.set("货币.金币", json!(5)).await.unwrap();
        character.set("start_presets", json!({"presets": []})).await.unwrap();

        assert_eq!(message.snapshot().await.unwrap(), json!({"货币": {"金币": 5}}));
        assert_eq!(
            character.snapshot().await.unwrap(),
            json!({"start_presets": {"presets": []}})
        );
    }

    #[tokio::test]
    async fn test_replace_preserves_key_order() {
        let store = SqliteVariableStore::new(pool().await, "message").await.unwrap();
        store
            .replace_all(json!({"背包": {"z": 1, "a": 2, "m": 3}}))
            .await
            .unwrap();
        let data = store.snapshot().await.unwrap();
        let keys: Vec<&String> = data["背包"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[tokio::test]
    async fn test_script_runs_against_given_snapshot() {
        let store = SqliteVariableStore::new(pool().await, "message").await.unwrap();
        let result = store
            .run_script("_.add(\"n\", 2);", &json!({"n": 1}))
            .await
            .unwrap();
        assert_eq!(result, Some(json!({"n": 3})));
        assert_eq!(store.snapshot().await.unwrap(), json!({}));
    }
}
