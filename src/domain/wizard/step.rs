//! Wizard step state machine.
//!
//! Defines where a session is in the dialogue and which moves are legal.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The position of a session in the integration dialogue.
///
/// Sessions move strictly forward:
/// - `AwaitingStart` → `AwaitingVariantSelection` (variant-aware mode only)
/// - → `AwaitingMemoryFn` → `AwaitingDatasetFn` → `AwaitingAltFn` → `Done`
/// - `Done` resets to `AwaitingStart` once generation has been triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// No flow running; waiting for `begin-integration`.
    #[default]
    AwaitingStart,

    /// Variant-aware mode: waiting for a catalog selection.
    AwaitingVariantSelection,

    /// Step 1/3: memory-allocation function.
    AwaitingMemoryFn,

    /// Step 2/3: dataset-loading function.
    AwaitingDatasetFn,

    /// Step 3/3: alternative debug-level source (or `none`).
    AwaitingAltFn,

    /// Configuration complete, generation triggered.
    Done,
}

impl WizardStep {
    /// Returns the "Step n/3" label for capture steps.
    pub fn progress_label(&self) -> Option<&'static str> {
        match self {
            Self::AwaitingMemoryFn => Some("Step 1/3"),
            Self::AwaitingDatasetFn => Some("Step 2/3"),
            Self::AwaitingAltFn => Some("Step 3/3"),
            _ => None,
        }
    }

    /// Returns true if free text at this step leads to a prompt that shows
    /// workspace-detected suggestions. `begin-integration` always probes.
    pub fn needs_workspace_analysis(&self) -> bool {
        matches!(self, Self::AwaitingVariantSelection | Self::AwaitingMemoryFn)
    }
}

impl StateMachine for WizardStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        use WizardStep::*;
        matches!(
            (self, target),
            (AwaitingStart, AwaitingVariantSelection)
                | (AwaitingStart, AwaitingMemoryFn)
                | (AwaitingVariantSelection, AwaitingMemoryFn)
                | (AwaitingMemoryFn, AwaitingDatasetFn)
                | (AwaitingDatasetFn, AwaitingAltFn)
                | (AwaitingAltFn, Done)
                | (Done, AwaitingStart)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use WizardStep::*;
        match self {
            AwaitingStart => vec![AwaitingVariantSelection, AwaitingMemoryFn],
            AwaitingVariantSelection => vec![AwaitingMemoryFn],
            AwaitingMemoryFn => vec![AwaitingDatasetFn],
            AwaitingDatasetFn => vec![AwaitingAltFn],
            AwaitingAltFn => vec![Done],
            Done => vec![AwaitingStart],
        }
    }
}
