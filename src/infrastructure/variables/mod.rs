//! Variable store adapters
//!
//! Both adapters hold one JSON document per scope and share the reference
//! command-script interpreter.

mod interpreter;
mod memory_store;
mod sqlite_store;

use std::sync::Arc;

use tokio::sync::watch;

pub use interpreter::{execute_script, parse_script, ScriptParseError};
pub use memory_store::InMemoryVariableStore;
pub use sqlite_store::SqliteVariableStore;

/// Scope holding the live character state written by synchronization
pub const MESSAGE_SCOPE: &str = "message";
/// Scope holding character-level data such as the preset blob
pub const CHARACTER_SCOPE: &str = "character";

/// One-shot initialization signal.
///
/// Clones observe the same flag; once ready it never goes back.
#[derive(Debug, Clone)]
pub struct ReadySignal {
    tx: Arc<watch::Sender<bool>>,
}

impl ReadySignal {
    pub fn pending() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn ready() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self { tx: Arc::new(tx) }
    }

    pub fn mark_ready(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_ready(&self) -> bool {
        *self.tx.borrow()
    }

    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in self, so the channel cannot close while waiting
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_returns_immediately_when_ready() {
        let signal = ReadySignal::ready();
        tokio::time::timeout(Duration::from_millis(100), signal.wait())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_suspends_until_marked() {
        let signal = ReadySignal::pending();
        assert!(!signal.is_ready());
        assert!(tokio::time::timeout(Duration::from_millis(20), signal.wait())
            .await
            .is_err());

        let trigger = signal.clone();
        tokio::spawn(async move { trigger.mark_ready() });
        tokio::time::timeout(Duration::from_secs(1), signal.wait())
            .await
            .unwrap();
        assert!(signal.is_ready());
    }
}
