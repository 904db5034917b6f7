//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

/// Log output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Filter from `RUST_LOG` if set, else from configuration.
    pub fn env_filter(&self) -> Result<EnvFilter, ValidationError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.filter)
                .map_err(|e| ValidationError::InvalidLogFilter(e.to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.filter)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "debug_unlock_wizard=info,warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_valid() {
        assert!(LoggingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let config = LoggingConfig {
            filter: "debug_unlock_wizard=loud".to_string(),
            json: false,
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLogFilter(_))
        ));
    }
}
