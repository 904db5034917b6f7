//! In-Memory Session Store Adapter
//!
//! Holds wizard sessions in process memory. Sessions are lost on restart.
//!
//! Turn-count keys are approximate. Every lookup re-registers the state one
//! key ahead, and a lookup that misses its exact key falls back to the key
//! just before it. Two conversations whose turn counts collide share an
//! entry and overwrite each other; use `SessionKey::SessionId` when the host
//! can supply a stable identifier.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::wizard::{SessionKey, SessionState};
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for wizard sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionKey, SessionState>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered keys (a session usually occupies two).
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Returns the state stored under exactly `key`, if any.
    pub async fn peek(&self, key: &SessionKey) -> Option<SessionState> {
        self.sessions.read().await.get(key).cloned()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, key: &SessionKey) -> Result<SessionState, SessionStoreError> {
        let mut sessions = self.sessions.write().await;

        let found = sessions.get(key).cloned().or_else(|| {
            key.previous().and_then(|previous| {
                let state = sessions.get(&previous).cloned();
                if state.is_some() {
                    debug!(%key, %previous, "Session found under preceding key");
                }
                state
            })
        });

        let state = match found {
            Some(state) => state,
            None => {
                debug!(%key, "Creating new session");
                SessionState::new()
            }
        };

        sessions.insert(key.next(), state.clone());
        if matches!(key, SessionKey::SessionId(_)) {
            sessions.insert(key.clone(), state.clone());
        }

        Ok(state)
    }

    async fn save(&self, key: &SessionKey, state: &SessionState) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;

        sessions.insert(key.clone(), state.clone());
        sessions.insert(key.next(), state.clone());
        if let Some(previous) = key.previous() {
            sessions.remove(&previous);
        }

        debug!(%key, step = ?state.step(), "Session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        self.sessions.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wizard::{Platform, WizardStep};

    fn started() -> SessionState {
        let mut state = SessionState::new();
        state.set_platform(Platform::Posix).unwrap();
        state.advance(WizardStep::AwaitingMemoryFn).unwrap();
        state
    }

    #[tokio::test]
    async fn creates_fresh_state_for_unknown_key() {
        let store = InMemorySessionStore::new();
        let state = store.get_or_create(&SessionKey::TurnCount(0)).await.unwrap();
        assert_eq!(state, SessionState::new());
    }

    #[tokio::test]
    async fn lookup_registers_under_next_key() {
        let store = InMemorySessionStore::new();
        store.get_or_create(&SessionKey::TurnCount(3)).await.unwrap();
        assert!(store.peek(&SessionKey::TurnCount(4)).await.is_some());
    }

    #[tokio::test]
    async fn saved_state_visible_under_next_key() {
        let store = InMemorySessionStore::new();
        store.save(&SessionKey::TurnCount(5), &started()).await.unwrap();

        let state = store.get_or_create(&SessionKey::TurnCount(6)).await.unwrap();
        assert_eq!(state, started());
    }

    #[tokio::test]
    async fn falls_back_to_preceding_key() {
        let store = InMemorySessionStore::new();
        store.save(&SessionKey::TurnCount(5), &started()).await.unwrap();

        // 7 misses, 6 was registered by the save.
        let state = store.get_or_create(&SessionKey::TurnCount(7)).await.unwrap();
        assert_eq!(state, started());
    }

    #[tokio::test]
    async fn distant_key_starts_over() {
        let store = InMemorySessionStore::new();
        store.save(&SessionKey::TurnCount(2), &started()).await.unwrap();

        let state = store.get_or_create(&SessionKey::TurnCount(9)).await.unwrap();
        assert_eq!(state.step(), WizardStep::AwaitingStart);
    }

    #[tokio::test]
    async fn save_prunes_older_key() {
        let store = InMemorySessionStore::new();
        store.save(&SessionKey::TurnCount(1), &started()).await.unwrap();
        store.save(&SessionKey::TurnCount(2), &started()).await.unwrap();

        assert!(store.peek(&SessionKey::TurnCount(1)).await.is_none());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn session_ids_are_exact() {
        let store = InMemorySessionStore::new();
        let a = SessionKey::SessionId("a".to_string());
        let b = SessionKey::SessionId("b".to_string());
        store.save(&a, &started()).await.unwrap();

        assert_eq!(store.get_or_create(&a).await.unwrap(), started());
        assert_eq!(store.get_or_create(&b).await.unwrap(), SessionState::new());
    }

    #[tokio::test]
    async fn clear_empties_store() {
        let store = InMemorySessionStore::new();
        store.save(&SessionKey::TurnCount(1), &started()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn stores_are_independent() {
        let one = InMemorySessionStore::new();
        let two = InMemorySessionStore::new();
        one.save(&SessionKey::TurnCount(1), &started()).await.unwrap();
        assert!(two.is_empty().await);
    }
}
