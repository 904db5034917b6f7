//! Dialogue engine.
//!
//! Pure state machine driver: given a session and one inbound message it
//! returns the next session, the reply, and (at the last step) the finished
//! configuration. It never touches storage or I/O; workspace facts arrive as
//! an already computed `WorkspaceAnalysis`.

use tracing::debug;

use crate::domain::foundation::ValidationError;
use crate::domain::workspace::WorkspaceAnalysis;

use super::catalog::{self, Variant};
use super::integration::IntegrationConfig;
use super::platform::PlatformToken;
use super::prompts;
use super::session::SessionState;
use super::step::WizardStep;

/// Engine behaviour switches.
#[derive(Debug, Clone, Default)]
pub struct DialogueConfig {
    /// Record empty text at capture steps instead of re-prompting. When off,
    /// a blank alternative-source reply means `none`.
    pub accept_empty_captures: bool,
}

/// Result of feeding one message to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// Session after the turn. Equal to the input when input was rejected.
    pub state: SessionState,
    /// Markdown reply for the user.
    pub reply: String,
    /// Set on the turn that completes the configuration.
    pub generate: Option<IntegrationConfig>,
}

impl TurnOutcome {
    fn unchanged(state: &SessionState, reply: String) -> Self {
        Self {
            state: state.clone(),
            reply,
            generate: None,
        }
    }

    fn advanced(state: SessionState, reply: String) -> Self {
        Self {
            state,
            reply,
            generate: None,
        }
    }
}

/// Drives a session through the integration dialogue.
#[derive(Debug, Clone, Default)]
pub struct DialogueEngine {
    config: DialogueConfig,
}

impl DialogueEngine {
    pub fn new(config: DialogueConfig) -> Self {
        Self { config }
    }

    /// Handles `begin-integration <token>`.
    ///
    /// Only valid from `AwaitingStart`; anywhere else the current question
    /// is asked again and nothing changes.
    pub fn begin(
        &self,
        state: &SessionState,
        token: &str,
        workspace: &WorkspaceAnalysis,
    ) -> Result<TurnOutcome, ValidationError> {
        if state.step() != WizardStep::AwaitingStart {
            let reply = format!(
                "{}{}",
                prompts::already_running(state.step()),
                self.current_question(state, workspace)
            );
            return Ok(TurnOutcome::unchanged(state, reply));
        }

        let Some(mode) = PlatformToken::parse(token) else {
            debug!(token, "Rejected platform token");
            return Ok(TurnOutcome::unchanged(state, prompts::invalid_platform(token)));
        };

        let mut next = state.clone();
        let mut reply = prompts::existing_files_notice(&workspace.existing_integration);

        match mode {
            PlatformToken::Direct(platform) => {
                let path = catalog::generic_path_for(platform);
                next.set_platform(platform)?;
                next.set_integration_path(path.clone())?;
                next.advance(WizardStep::AwaitingMemoryFn)?;
                reply.push_str(&prompts::started_direct(platform, workspace.platform, &path));
                reply.push_str(&prompts::memory_prompt(&workspace.memory_candidates));
            }
            PlatformToken::VariantAware => {
                if let Some(platform) = workspace.platform {
                    next.set_platform(platform)?;
                }
                next.advance(WizardStep::AwaitingVariantSelection)?;
                reply.push_str(&prompts::variant_menu(workspace.variant));
            }
        }

        debug!(step = ?next.step(), platform = ?next.platform(), "Integration started");
        Ok(TurnOutcome::advanced(next, reply))
    }

    /// Handles free text for whatever step the session is at.
    pub fn respond(
        &self,
        state: &SessionState,
        text: &str,
        workspace: &WorkspaceAnalysis,
    ) -> Result<TurnOutcome, ValidationError> {
        let text = text.trim();

        match state.step() {
            WizardStep::AwaitingStart => Ok(TurnOutcome::unchanged(state, prompts::overview())),
            WizardStep::AwaitingVariantSelection => self.select_variant(state, text, workspace),
            WizardStep::AwaitingMemoryFn => self.capture_memory_fn(state, text, workspace),
            WizardStep::AwaitingDatasetFn => self.capture_dataset_fn(state, text),
            WizardStep::AwaitingAltFn => self.capture_alt_fn(state, text),
            WizardStep::Done => {
                let mut next = state.clone();
                next.reset()?;
                Ok(TurnOutcome::advanced(next, prompts::overview()))
            }
        }
    }

    /// Question for the session's current step, used when re-prompting.
    pub fn current_question(&self, state: &SessionState, workspace: &WorkspaceAnalysis) -> String {
        match state.step() {
            WizardStep::AwaitingStart | WizardStep::Done => prompts::overview(),
            WizardStep::AwaitingVariantSelection => prompts::variant_menu(workspace.variant),
            WizardStep::AwaitingMemoryFn => prompts::memory_prompt(&workspace.memory_candidates),
            WizardStep::AwaitingDatasetFn => prompts::dataset_prompt(&workspace.dataset_candidates),
            WizardStep::AwaitingAltFn => prompts::alt_prompt(),
        }
    }

    fn select_variant(
        &self,
        state: &SessionState,
        text: &str,
        workspace: &WorkspaceAnalysis,
    ) -> Result<TurnOutcome, ValidationError> {
        let Some(variant) = Variant::parse_selection(text) else {
            return Ok(TurnOutcome::unchanged(
                state,
                prompts::invalid_selection(text, workspace.variant),
            ));
        };

        let path = catalog::resolve(variant);
        let mut next = state.clone();
        next.set_variant(variant)?;
        next.set_integration_path(path.clone())?;
        next.advance(WizardStep::AwaitingMemoryFn)?;

        let reply = format!(
            "{}{}",
            prompts::variant_selected(variant, &path),
            prompts::memory_prompt(&workspace.memory_candidates)
        );
        Ok(TurnOutcome::advanced(next, reply))
    }

    fn capture_memory_fn(
        &self,
        state: &SessionState,
        text: &str,
        workspace: &WorkspaceAnalysis,
    ) -> Result<TurnOutcome, ValidationError> {
        if let Some(reprompt) = self.reject_empty(state, text, workspace) {
            return Ok(reprompt);
        }

        let mut next = state.clone();
        next.record_memory_fn(text)?;
        next.advance(WizardStep::AwaitingDatasetFn)?;

        let reply = format!(
            "{}{}",
            prompts::captured("Memory allocation function", text),
            prompts::dataset_prompt(&workspace.dataset_candidates)
        );
        Ok(TurnOutcome::advanced(next, reply))
    }

    fn capture_dataset_fn(
        &self,
        state: &SessionState,
        text: &str,
    ) -> Result<TurnOutcome, ValidationError> {
        if let Some(reprompt) = self.reject_empty(state, text, &WorkspaceAnalysis::empty()) {
            return Ok(reprompt);
        }

        let mut next = state.clone();
        next.record_dataset_fn(text)?;
        next.advance(WizardStep::AwaitingAltFn)?;

        let reply = format!(
            "{}{}",
            prompts::captured("Dataset loading function", text),
            prompts::alt_prompt()
        );
        Ok(TurnOutcome::advanced(next, reply))
    }

    fn capture_alt_fn(
        &self,
        state: &SessionState,
        text: &str,
    ) -> Result<TurnOutcome, ValidationError> {
        let alt_fn = if text.is_empty() && !self.config.accept_empty_captures {
            "none"
        } else {
            text
        };

        let mut next = state.clone();
        next.record_alt_fn(alt_fn)?;
        next.advance(WizardStep::Done)?;

        let config = next
            .to_config()
            .ok_or_else(|| ValidationError::empty_field("integration_path"))?;

        let reply = format!(
            "{}{}",
            prompts::captured("Alternative debug-level source", text),
            prompts::configuration_complete(&config)
        );

        Ok(TurnOutcome {
            state: next,
            reply,
            generate: Some(config),
        })
    }

    fn reject_empty(
        &self,
        state: &SessionState,
        text: &str,
        workspace: &WorkspaceAnalysis,
    ) -> Option<TurnOutcome> {
        if !text.is_empty() || self.config.accept_empty_captures {
            return None;
        }
        let reply = format!(
            "{}{}",
            prompts::empty_capture(state.step()),
            self.current_question(state, workspace)
        );
        Some(TurnOutcome::unchanged(state, reply))
    }
}
