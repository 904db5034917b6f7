//! Local Workspace Adapter - Implementation of WorkspaceFiles over a directory.
//!
//! Walks the tree with `walkdir` on the blocking pool, in file-name order so
//! results are deterministic, and skips build and VCS directories.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::{compile_pattern, matches};
use crate::ports::{WorkspaceError, WorkspaceFiles};

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &[".git", "target", "node_modules", "build"];

/// Workspace rooted at a local directory.
#[derive(Debug, Clone)]
pub struct LocalWorkspace {
    root: PathBuf,
}

impl LocalWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_skipped(entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && SKIPPED_DIRS
                .iter()
                .any(|dir| entry.file_name().to_str() == Some(*dir))
    }

    fn relative(root: &Path, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }

    /// Resolves a workspace-relative path, refusing to leave the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, WorkspaceError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(WorkspaceError::NotFound(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl WorkspaceFiles for LocalWorkspace {
    async fn find_files(
        &self,
        pattern: &str,
        max: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, WorkspaceError> {
        let compiled = compile_pattern(pattern)?;
        if max == 0 {
            return Ok(Vec::new());
        }

        let root = self.root.clone();
        let token = cancel.clone();

        let found = tokio::task::spawn_blocking(move || {
            let mut found = Vec::new();
            let walker = WalkDir::new(&root)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| !Self::is_skipped(e))
                .filter_map(|e| e.ok());

            for entry in walker {
                if token.is_cancelled() {
                    return Err(WorkspaceError::Cancelled);
                }
                if !entry.file_type().is_file() {
                    continue;
                }
                let Some(relative) = Self::relative(&root, entry.path()) else {
                    continue;
                };
                if matches(&compiled, &relative) {
                    found.push(relative);
                    if found.len() >= max {
                        break;
                    }
                }
            }
            Ok(found)
        })
        .await
        .map_err(|e| WorkspaceError::Io(format!("search task failed: {}", e)))??;

        debug!(pattern, count = found.len(), "Workspace search complete");
        Ok(found)
    }

    async fn read_file(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<String, WorkspaceError> {
        let full = self.resolve(path)?;

        tokio::select! {
            _ = cancel.cancelled() => Err(WorkspaceError::Cancelled),
            result = tokio::fs::read(&full) => match result {
                Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    Err(WorkspaceError::NotFound(path.to_string()))
                }
                Err(e) => Err(WorkspaceError::Io(e.to_string())),
            },
        }
    }
}
