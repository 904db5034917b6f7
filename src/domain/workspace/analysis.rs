//! Snapshot of what the prober found in a workspace.

use serde::{Deserialize, Serialize};

use crate::domain::wizard::{Platform, Variant};

/// Best-effort, non-authoritative facts about the user's project.
///
/// Recomputed on demand and never stored with the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceAnalysis {
    pub platform: Option<Platform>,
    pub variant: Option<Variant>,
    pub memory_candidates: Vec<String>,
    pub dataset_candidates: Vec<String>,
    pub existing_integration: Vec<String>,
}

impl WorkspaceAnalysis {
    /// An analysis with nothing detected.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if nothing at all was detected.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Insertion-ordered list that ignores repeated names.
#[derive(Debug, Clone, Default)]
pub struct CandidateList {
    names: Vec<String>,
}

impl CandidateList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name unless it is already present. Returns true if added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.names.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl Extend<String> for CandidateList {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}
