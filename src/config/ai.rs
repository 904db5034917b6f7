//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Code-generation model configuration.
///
/// Without an API key the wizard still runs; finished configurations are
/// shown as a summary instead of generated code.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Anthropic API key
    pub anthropic_api_key: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Output limit per generation
    pub max_tokens: Option<u32>,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ValidationError::InvalidUrl("ai.base_url"));
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            max_tokens: None,
        }
    }
}

fn default_model() -> String {
    crate::adapters::ai::DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    crate::adapters::ai::DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_retries() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.base_url, "https://api.anthropic.com");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.max_retries, 3);
        assert!(!config.has_anthropic());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 60,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_empty_key_is_not_configured() {
        let config = AiConfig {
            anthropic_api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.has_anthropic());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let zero = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(zero.validate(), Err(ValidationError::InvalidTimeout));

        let url = AiConfig {
            base_url: "api.anthropic.com".to_string(),
            ..Default::default()
        };
        assert_eq!(url.validate(), Err(ValidationError::InvalidUrl("ai.base_url")));
    }
}
