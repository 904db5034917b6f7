//! In-Memory Workspace Adapter
//!
//! A fixed map of relative paths to contents. Paths can be marked
//! unreadable to simulate permission errors.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tokio_util::sync::CancellationToken;

use super::{compile_pattern, matches};
use crate::ports::{WorkspaceError, WorkspaceFiles};

/// Workspace backed by an in-memory file map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkspace {
    files: BTreeMap<String, String>,
    unreadable: BTreeSet<String>,
}

impl InMemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file.
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Adds a file that is listed by searches but fails to read.
    pub fn with_unreadable(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.files.insert(path.clone(), String::new());
        self.unreadable.insert(path);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait]
impl WorkspaceFiles for InMemoryWorkspace {
    async fn find_files(
        &self,
        pattern: &str,
        max: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, WorkspaceError> {
        if cancel.is_cancelled() {
            return Err(WorkspaceError::Cancelled);
        }
        let compiled = compile_pattern(pattern)?;

        Ok(self
            .files
            .keys()
            .filter(|path| matches(&compiled, path))
            .take(max)
            .cloned()
            .collect())
    }

    async fn read_file(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<String, WorkspaceError> {
        if cancel.is_cancelled() {
            return Err(WorkspaceError::Cancelled);
        }
        if self.unreadable.contains(path) {
            return Err(WorkspaceError::Io(format!("permission denied: {}", path)));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| WorkspaceError::NotFound(path.to_string()))
    }
}
