//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid URL for {0}")]
    InvalidUrl(&'static str),

    #[error("Scan limit {0} must be greater than zero")]
    InvalidLimit(&'static str),

    #[error("Header scan limit exceeds header search limit")]
    ScanExceedsSearch,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
