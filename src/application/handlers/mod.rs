//! Application handlers.
//!
//! Command handlers that orchestrate the wizard domain and the ports.

mod generate_integration;
mod handle_turn;
mod inspect_workspace;
mod wrap_function;

pub use generate_integration::{
    GenerateIntegrationCommand, GenerateIntegrationHandler, GenerateIntegrationResult,
    GenerationError, GenerationOutcome, GenerationSettings, DOMAIN_KNOWLEDGE,
};
pub use handle_turn::{
    HandleTurnCommand, HandleTurnHandler, HandleTurnResult, TurnAction, TurnError,
};
pub use inspect_workspace::{InspectWorkspaceHandler, InspectWorkspaceResult};
pub use wrap_function::{WrapFunctionCommand, WrapFunctionHandler};
