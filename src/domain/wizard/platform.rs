//! Target platforms and the platform token accepted by `begin-integration`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Software platform the integration layer is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Posix,
    Autosar,
}

impl Platform {
    /// Returns the lowercase token used on the command line and in paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Posix => "posix",
            Platform::Autosar => "autosar",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Posix => "POSIX",
            Platform::Autosar => "AUTOSAR",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Mode requested by the `begin-integration` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformToken {
    /// Skip variant selection and integrate directly for a platform.
    Direct(Platform),
    /// Ask the user to pick a deployment variant from the catalog first.
    VariantAware,
}

impl PlatformToken {
    /// Tokens listed in usage hints.
    pub const ACCEPTED: &'static [&'static str] = &["posix", "autosar", "variant-aware"];

    /// Parses a platform token, case-insensitively.
    ///
    /// Returns `None` for anything outside the accepted set, including the
    /// empty string.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "posix" => Some(PlatformToken::Direct(Platform::Posix)),
            "autosar" => Some(PlatformToken::Direct(Platform::Autosar)),
            "variant-aware" | "variant_aware" | "variant" => Some(PlatformToken::VariantAware),
            _ => None,
        }
    }
}
