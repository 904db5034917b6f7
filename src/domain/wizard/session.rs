//! Per-conversation wizard state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{StateMachine, ValidationError};

use super::catalog::Variant;
use super::integration::IntegrationConfig;
use super::platform::Platform;
use super::step::WizardStep;

/// Key under which a session's state is stored between turns.
///
/// The host only reports how many turns a conversation has had, so the
/// default key is that count. Two conversations with the same count share a
/// key and overwrite each other; `SessionId` avoids this when the host can
/// supply a stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKey {
    TurnCount(u64),
    SessionId(String),
}

impl SessionKey {
    /// Key the following turn of the same conversation will arrive with.
    pub fn next(&self) -> SessionKey {
        match self {
            SessionKey::TurnCount(n) => SessionKey::TurnCount(n.saturating_add(1)),
            SessionKey::SessionId(id) => SessionKey::SessionId(id.clone()),
        }
    }

    /// Key the previous turn was stored under, for turn-count keys only.
    pub fn previous(&self) -> Option<SessionKey> {
        match self {
            SessionKey::TurnCount(n) => n.checked_sub(1).map(SessionKey::TurnCount),
            SessionKey::SessionId(_) => None,
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKey::TurnCount(n) => write!(f, "turn:{}", n),
            SessionKey::SessionId(id) => write!(f, "session:{}", id),
        }
    }
}

/// State of one wizard conversation.
///
/// Fields after `step` are write-once; only `reset` clears them, and only
/// from `Done`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    step: WizardStep,
    platform: Option<Platform>,
    variant: Option<Variant>,
    integration_path: Option<String>,
    memory_fn: Option<String>,
    dataset_fn: Option<String>,
    alt_fn: Option<String>,
}

impl SessionState {
    /// Creates a fresh session awaiting `begin-integration`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn platform(&self) -> Option<Platform> {
        self.platform
    }

    pub fn variant(&self) -> Option<Variant> {
        self.variant
    }

    pub fn integration_path(&self) -> Option<&str> {
        self.integration_path.as_deref()
    }

    pub fn memory_fn(&self) -> Option<&str> {
        self.memory_fn.as_deref()
    }

    pub fn dataset_fn(&self) -> Option<&str> {
        self.dataset_fn.as_deref()
    }

    pub fn alt_fn(&self) -> Option<&str> {
        self.alt_fn.as_deref()
    }

    /// Platform used for generation: the one chosen at start, else the one
    /// implied by the selected variant.
    pub fn effective_platform(&self) -> Option<Platform> {
        self.platform
            .or_else(|| self.variant.and_then(|variant| variant.platform()))
    }

    /// Moves to the next step, rejecting anything but a legal forward move.
    pub fn advance(&mut self, target: WizardStep) -> Result<(), ValidationError> {
        self.step = self.step.transition_to(target)?;
        Ok(())
    }

    pub fn set_platform(&mut self, platform: Platform) -> Result<(), ValidationError> {
        write_once(&mut self.platform, platform, "platform")
    }

    pub fn set_variant(&mut self, variant: Variant) -> Result<(), ValidationError> {
        write_once(&mut self.variant, variant, "variant")
    }

    pub fn set_integration_path(&mut self, path: impl Into<String>) -> Result<(), ValidationError> {
        write_once(&mut self.integration_path, path.into(), "integration_path")
    }

    pub fn record_memory_fn(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        write_once(&mut self.memory_fn, name.into(), "memory_fn")
    }

    pub fn record_dataset_fn(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        if self.memory_fn.is_none() {
            return Err(ValidationError::empty_field("memory_fn"));
        }
        write_once(&mut self.dataset_fn, name.into(), "dataset_fn")
    }

    pub fn record_alt_fn(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        if self.dataset_fn.is_none() {
            return Err(ValidationError::empty_field("dataset_fn"));
        }
        write_once(&mut self.alt_fn, name.into(), "alt_fn")
    }

    /// Snapshot handed to the generation adapter, once complete.
    pub fn to_config(&self) -> Option<IntegrationConfig> {
        Some(IntegrationConfig {
            platform: self.effective_platform(),
            variant: self.variant,
            integration_path: self.integration_path.clone()?,
            memory_fn: self.memory_fn.clone()?,
            dataset_fn: self.dataset_fn.clone()?,
            alt_fn: self.alt_fn.clone()?,
        })
    }

    /// Returns to `AwaitingStart` after generation, discarding captures.
    pub fn reset(&mut self) -> Result<(), ValidationError> {
        self.step.transition_to(WizardStep::AwaitingStart)?;
        *self = Self::default();
        Ok(())
    }
}

fn write_once<T>(slot: &mut Option<T>, value: T, field: &str) -> Result<(), ValidationError> {
    if slot.is_some() {
        return Err(ValidationError::already_set(field));
    }
    *slot = Some(value);
    Ok(())
}
