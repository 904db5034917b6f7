//! Session Store Port - keeps wizard sessions between turns.
//!
//! Turn-count keys are approximate: the host only reports how many turns a
//! conversation has had. Implementations must tolerate the key being one
//! ahead of where the state was last registered.

use async_trait::async_trait;

use crate::domain::wizard::{SessionKey, SessionState};

/// Errors that can occur during session storage operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to serialize session: {0}")]
    Serialization(String),
}

/// Port for in-flight session storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the state for `key`, creating a fresh one if needed.
    ///
    /// For `SessionKey::TurnCount(n)` the lookup tries `n`, then `n - 1`,
    /// and registers whatever it returns under `n + 1` so the next turn
    /// finds it.
    async fn get_or_create(&self, key: &SessionKey) -> Result<SessionState, SessionStoreError>;

    /// Commits the state produced by a turn.
    async fn save(&self, key: &SessionKey, state: &SessionState) -> Result<(), SessionStoreError>;

    /// Drops every stored session.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}
