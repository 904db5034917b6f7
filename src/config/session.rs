//! Session keying configuration

use serde::Deserialize;

use crate::domain::wizard::SessionKey;

/// How turns are associated with a stored session.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionKeying {
    /// Key by the host's turn count, tolerating an off-by-one.
    #[default]
    TurnCount,
    /// Key by a stable identifier supplied once per conversation.
    SessionId,
}

/// Session storage configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub keying: SessionKeying,
}

impl SessionConfig {
    /// Key for a turn, given the turn count and the conversation's id.
    pub fn key_for(&self, turn_count: u64, session_id: &str) -> SessionKey {
        match self.keying {
            SessionKeying::TurnCount => SessionKey::TurnCount(turn_count),
            SessionKeying::SessionId => SessionKey::SessionId(session_id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys_by_turn_count() {
        let config = SessionConfig::default();
        assert_eq!(config.key_for(4, "abc"), SessionKey::TurnCount(4));
    }

    #[test]
    fn test_session_id_keying() {
        let config = SessionConfig {
            keying: SessionKeying::SessionId,
        };
        assert_eq!(
            config.key_for(4, "abc"),
            SessionKey::SessionId("abc".to_string())
        );
    }
}
