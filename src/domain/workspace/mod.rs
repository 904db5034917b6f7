//! Workspace domain module.
//!
//! Pure vocabulary for probing a project tree: the analysis snapshot, the
//! fixed detection tables and the pluggable function matcher. The I/O lives
//! behind the `WorkspaceFiles` port.

mod analysis;
mod matcher;
pub mod patterns;

pub use analysis::{CandidateList, WorkspaceAnalysis};
pub use matcher::{FunctionMatch, FunctionMatcher, FunctionRole, MarkerMatcher};
