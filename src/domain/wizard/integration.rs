//! Finished integration configuration.

use serde::{Deserialize, Serialize};

use super::catalog::Variant;
use super::platform::Platform;

/// Everything the generator needs, captured over one wizard run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    pub platform: Option<Platform>,
    pub variant: Option<Variant>,
    pub integration_path: String,
    pub memory_fn: String,
    pub dataset_fn: String,
    pub alt_fn: String,
}

impl IntegrationConfig {
    /// Returns true when the user declined an alternative debug-level source.
    pub fn has_alt_source(&self) -> bool {
        let alt = self.alt_fn.trim();
        !(alt.is_empty() || alt.eq_ignore_ascii_case("none"))
    }

    /// Renders the configuration as YAML for the generation request.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Markdown summary shown when no generator is reachable.
    pub fn summary_markdown(&self) -> String {
        let platform = self
            .platform
            .map(|p| p.display_name())
            .unwrap_or("unknown");
        let variant = self
            .variant
            .map(|v| v.display_name())
            .unwrap_or("none (direct mode)");

        let mut out = String::from("### Captured configuration\n\n");
        out.push_str(&format!("- **Platform:** {}\n", platform));
        out.push_str(&format!("- **Variant:** {}\n", variant));
        out.push_str(&format!("- **Integration path:** `{}`\n", self.integration_path));
        out.push_str(&format!("- **Memory allocation function:** `{}`\n", self.memory_fn));
        out.push_str(&format!("- **Dataset loading function:** `{}`\n", self.dataset_fn));
        if self.has_alt_source() {
            out.push_str(&format!("- **Alternative debug-level source:** `{}`\n", self.alt_fn));
        } else {
            out.push_str("- **Alternative debug-level source:** none\n");
        }
        out
    }
}
