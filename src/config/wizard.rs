//! Dialogue behaviour configuration

use serde::Deserialize;

use crate::domain::wizard::DialogueConfig;

/// Wizard dialogue switches
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WizardConfig {
    /// Record empty replies at capture steps instead of asking again
    #[serde(default)]
    pub accept_empty_captures: bool,
}

impl WizardConfig {
    pub fn dialogue_config(&self) -> DialogueConfig {
        DialogueConfig {
            accept_empty_captures: self.accept_empty_captures,
        }
    }
}
