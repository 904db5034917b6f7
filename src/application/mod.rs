//! Application layer - Handlers and the workspace prober.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
pub mod prober;

pub use handlers::{
    GenerateIntegrationCommand, GenerateIntegrationHandler, GenerateIntegrationResult,
    GenerationError, GenerationOutcome, GenerationSettings, HandleTurnCommand, HandleTurnHandler,
    HandleTurnResult, InspectWorkspaceHandler, TurnAction, TurnError, WrapFunctionHandler,
};
pub use prober::{FunctionCandidates, ProbeLimits, WorkspaceProber};
