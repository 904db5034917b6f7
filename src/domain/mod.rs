//! Domain layer containing the wizard's business logic and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (validation errors, state machine trait)
//! - `wizard` - Session state, variant catalog and the dialogue engine
//! - `workspace` - Workspace analysis vocabulary and function matching

pub mod foundation;
pub mod wizard;
pub mod workspace;
