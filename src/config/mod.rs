//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `DEBUG_UNLOCK_WIZARD`
//! prefix and nested values are separated by double underscores. Every
//! section has defaults, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use debug_unlock_wizard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod logging;
mod session;
mod wizard;
mod workspace;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use session::{SessionConfig, SessionKeying};
pub use wizard::WizardConfig;
pub use workspace::WorkspaceConfig;

use serde::Deserialize;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DEBUG_UNLOCK_WIZARD";

/// Conventional variable consulted when no prefixed key is set
const ANTHROPIC_KEY_FALLBACK: &str = "ANTHROPIC_API_KEY";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Code generation model
    #[serde(default)]
    pub ai: AiConfig,

    /// Workspace root and probe limits
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Session keying
    #[serde(default)]
    pub session: SessionConfig,

    /// Dialogue switches
    #[serde(default)]
    pub wizard: WizardConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads variables such as:
    ///
    /// - `DEBUG_UNLOCK_WIZARD__WORKSPACE__ROOT=/src/ecu` -> `workspace.root`
    /// - `DEBUG_UNLOCK_WIZARD__AI__MODEL=...` -> `ai.model`
    /// - `DEBUG_UNLOCK_WIZARD__SESSION__KEYING=session_id` -> `session.keying`
    ///
    /// `ANTHROPIC_API_KEY` is used when `DEBUG_UNLOCK_WIZARD__AI__ANTHROPIC_API_KEY`
    /// is not set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if config.ai.anthropic_api_key.is_none() {
            config.ai.anthropic_api_key = std::env::var(ANTHROPIC_KEY_FALLBACK)
                .ok()
                .filter(|key| !key.is_empty());
        }

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.workspace.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
