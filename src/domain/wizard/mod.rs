//! Wizard domain module.
//!
//! Session state, the step state machine, the variant catalog and the
//! dialogue engine that ties them together. Everything here is synchronous
//! and free of I/O.

mod catalog;
mod directive;
mod engine;
mod integration;
mod platform;
pub mod prompts;
mod session;
mod step;

pub use catalog::{
    existing_integration_pattern, generic_path_for, resolve, CatalogEntry, Variant,
    GENERIC_PATH_TEMPLATE, INTEGRATION_DIR,
};
pub use directive::Directive;
pub use engine::{DialogueConfig, DialogueEngine, TurnOutcome};
pub use integration::IntegrationConfig;
pub use platform::{Platform, PlatformToken};
pub use session::{SessionKey, SessionState};
pub use step::WizardStep;
