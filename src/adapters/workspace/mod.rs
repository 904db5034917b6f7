//! Workspace Adapters
//!
//! Implementations of the WorkspaceFiles port.
//!
//! - **LocalWorkspace** - a directory on disk
//! - **InMemoryWorkspace** - a fixed file map (tests and embedding hosts)

mod in_memory_workspace;
mod local_workspace;

pub use in_memory_workspace::InMemoryWorkspace;
pub use local_workspace::LocalWorkspace;

use glob::{MatchOptions, Pattern};

use crate::ports::WorkspaceError;

/// `*` stays within one path component; `**` crosses them.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

fn compile_pattern(pattern: &str) -> Result<Pattern, WorkspaceError> {
    Pattern::new(pattern).map_err(|e| WorkspaceError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.msg.to_string(),
    })
}

fn matches(pattern: &Pattern, relative_path: &str) -> bool {
    pattern.matches_with(relative_path, MATCH_OPTIONS)
}
