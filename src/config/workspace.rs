//! Workspace probing configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::application::prober::ProbeLimits;

/// Where the workspace is and how much of it one probe may touch.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceConfig {
    /// Workspace root directory
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Entry-point files read for platform detection
    #[serde(default = "default_entry_points")]
    pub entry_point_limit: usize,

    /// Header files listed when looking for candidate functions
    #[serde(default = "default_header_search")]
    pub header_search_limit: usize,

    /// Header files actually read
    #[serde(default = "default_header_scan")]
    pub header_scan_limit: usize,

    /// Existing integration files reported
    #[serde(default = "default_existing")]
    pub existing_file_limit: usize,
}

impl WorkspaceConfig {
    pub fn probe_limits(&self) -> ProbeLimits {
        ProbeLimits {
            entry_points: self.entry_point_limit,
            header_search: self.header_search_limit,
            header_scan: self.header_scan_limit,
            existing_files: self.existing_file_limit,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let limits = [
            ("entry_point_limit", self.entry_point_limit),
            ("header_search_limit", self.header_search_limit),
            ("header_scan_limit", self.header_scan_limit),
            ("existing_file_limit", self.existing_file_limit),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, value)| *value == 0) {
            return Err(ValidationError::InvalidLimit(name));
        }
        if self.header_scan_limit > self.header_search_limit {
            return Err(ValidationError::ScanExceedsSearch);
        }
        Ok(())
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            entry_point_limit: default_entry_points(),
            header_search_limit: default_header_search(),
            header_scan_limit: default_header_scan(),
            existing_file_limit: default_existing(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_entry_points() -> usize {
    5
}

fn default_header_search() -> usize {
    100
}

fn default_header_scan() -> usize {
    50
}

fn default_existing() -> usize {
    10
}
