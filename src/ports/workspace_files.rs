//! Workspace Files Port - read-only access to the user's project tree.
//!
//! The prober only ever searches by glob and reads whole files, so that is
//! all this port exposes. Paths are workspace-relative with `/` separators.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Errors that can occur while searching or reading the workspace.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("Invalid search pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Workspace operation cancelled")]
    Cancelled,
}

/// Port for searching and reading workspace files.
#[async_trait]
pub trait WorkspaceFiles: Send + Sync {
    /// Find files matching a glob pattern.
    ///
    /// Returns at most `max` relative paths in a stable order. A cancelled
    /// search returns `WorkspaceError::Cancelled`.
    async fn find_files(
        &self,
        pattern: &str,
        max: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, WorkspaceError>;

    /// Read a file as UTF-8 text (lossy).
    async fn read_file(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<String, WorkspaceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_files_is_object_safe() {
        fn _accepts_dyn(_files: &dyn WorkspaceFiles) {}
    }

    #[test]
    fn errors_render_context() {
        let err = WorkspaceError::InvalidPattern {
            pattern: "[".to_string(),
            reason: "unclosed".to_string(),
        };
        assert!(err.to_string().contains("'['"));
    }
}
