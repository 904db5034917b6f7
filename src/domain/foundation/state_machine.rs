//! State machine trait for step enums.
//!
//! Gives every lifecycle enum the same validated transition surface, so the
//! dialogue engine never writes a step it has not checked.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors list their legal edges; `transition_to` is derived.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for WizardStep {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!(
///             (self, target),
///             (AwaitingMemoryFn, AwaitingDatasetFn) |
///             // ... etc
///         )
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             AwaitingMemoryFn => vec![AwaitingDatasetFn],
///             // ... etc
///         }
///     }
/// }
///
/// let next = WizardStep::AwaitingMemoryFn.transition_to(WizardStep::AwaitingDatasetFn)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
