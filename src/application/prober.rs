//! Workspace prober.
//!
//! Best-effort detection of platform, variant and candidate functions. No
//! operation fails: unreadable files, bad patterns and search errors count as
//! "no match" and are logged at debug level. Each call rescans the workspace.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::wizard::{existing_integration_pattern, Platform, Variant};
use crate::domain::workspace::patterns::{
    platform_from_markers, ENTRY_POINT_PATTERNS, HEADER_PATTERNS, VARIANT_PATTERNS,
};
use crate::domain::workspace::{
    CandidateList, FunctionMatcher, FunctionRole, MarkerMatcher, WorkspaceAnalysis,
};
use crate::ports::WorkspaceFiles;

/// Bounds on how much of the workspace one probe touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeLimits {
    /// Entry-point files read for platform detection.
    pub entry_points: usize,
    /// Header files listed by the candidate search.
    pub header_search: usize,
    /// Header files actually read.
    pub header_scan: usize,
    /// Existing integration files reported.
    pub existing_files: usize,
}

impl Default for ProbeLimits {
    fn default() -> Self {
        Self {
            entry_points: 5,
            header_search: 100,
            header_scan: 50,
            existing_files: 10,
        }
    }
}

/// Candidate function names, de-duplicated, in order of discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionCandidates {
    pub memory: Vec<String>,
    pub dataset: Vec<String>,
}

/// Scans a workspace for integration hints.
pub struct WorkspaceProber {
    files: Arc<dyn WorkspaceFiles>,
    matcher: Arc<dyn FunctionMatcher>,
    limits: ProbeLimits,
}

impl WorkspaceProber {
    pub fn new(files: Arc<dyn WorkspaceFiles>) -> Self {
        Self {
            files,
            matcher: Arc::new(MarkerMatcher::default()),
            limits: ProbeLimits::default(),
        }
    }

    pub fn with_matcher(mut self, matcher: Arc<dyn FunctionMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_limits(mut self, limits: ProbeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Runs every detection in sequence.
    ///
    /// A cancelled probe returns whatever was found before cancellation;
    /// callers check the token.
    pub async fn analyze(&self, cancel: &CancellationToken) -> WorkspaceAnalysis {
        let variant = self.detect_variant(cancel).await;
        let platform = self.detect_platform(cancel).await;
        let candidates = self.find_candidate_functions(cancel).await;
        let existing_integration = self.find_existing_integration(cancel).await;

        debug!(
            ?platform,
            ?variant,
            memory = candidates.memory.len(),
            dataset = candidates.dataset.len(),
            existing = existing_integration.len(),
            "Workspace analysed"
        );

        WorkspaceAnalysis {
            platform,
            variant,
            memory_candidates: candidates.memory,
            dataset_candidates: candidates.dataset,
            existing_integration,
        }
    }

    /// First variant whose path pattern matches anything.
    pub async fn detect_variant(&self, cancel: &CancellationToken) -> Option<Variant> {
        for pattern in VARIANT_PATTERNS {
            if cancel.is_cancelled() {
                return None;
            }
            if !self.search(pattern.glob, 1, cancel).await.is_empty() {
                return Some(pattern.variant);
            }
        }
        None
    }

    /// First platform whose markers appear in an entry-point file.
    pub async fn detect_platform(&self, cancel: &CancellationToken) -> Option<Platform> {
        let mut entry_points = CandidateList::new();
        for pattern in ENTRY_POINT_PATTERNS {
            let remaining = self.limits.entry_points.saturating_sub(entry_points.len());
            if remaining == 0 {
                break;
            }
            entry_points.extend(self.search(pattern, remaining, cancel).await);
        }

        for path in entry_points.into_vec() {
            if let Some(contents) = self.read(&path, cancel).await {
                if let Some(platform) = platform_from_markers(&contents) {
                    debug!(path = %path, ?platform, "Platform markers found");
                    return Some(platform);
                }
            }
        }
        None
    }

    /// Memory-allocation and dataset-loading candidates from header files.
    pub async fn find_candidate_functions(&self, cancel: &CancellationToken) -> FunctionCandidates {
        let mut headers = CandidateList::new();
        for pattern in HEADER_PATTERNS {
            let remaining = self.limits.header_search.saturating_sub(headers.len());
            if remaining == 0 {
                break;
            }
            headers.extend(self.search(pattern, remaining, cancel).await);
        }

        let mut memory = CandidateList::new();
        let mut dataset = CandidateList::new();

        for path in headers.into_vec().into_iter().take(self.limits.header_scan) {
            let Some(contents) = self.read(&path, cancel).await else {
                continue;
            };
            for found in self.matcher.scan(&contents) {
                match found.role {
                    FunctionRole::MemoryAllocation => memory.insert(found.name),
                    FunctionRole::DatasetLoading => dataset.insert(found.name),
                };
            }
        }

        FunctionCandidates {
            memory: memory.into_vec(),
            dataset: dataset.into_vec(),
        }
    }

    /// Files already under an integration directory.
    pub async fn find_existing_integration(&self, cancel: &CancellationToken) -> Vec<String> {
        self.search(
            &existing_integration_pattern(),
            self.limits.existing_files,
            cancel,
        )
        .await
    }

    async fn search(&self, pattern: &str, max: usize, cancel: &CancellationToken) -> Vec<String> {
        if cancel.is_cancelled() {
            return Vec::new();
        }
        match self.files.find_files(pattern, max, cancel).await {
            Ok(found) => found,
            Err(err) => {
                debug!(pattern, error = %err, "Workspace search failed");
                Vec::new()
            }
        }
    }

    async fn read(&self, path: &str, cancel: &CancellationToken) -> Option<String> {
        if cancel.is_cancelled() {
            return None;
        }
        match self.files.read_file(path, cancel).await {
            Ok(contents) => Some(contents),
            Err(err) => {
                debug!(path, error = %err, "Workspace read failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::workspace::InMemoryWorkspace;
    use proptest::prelude::*;

    fn prober(workspace: InMemoryWorkspace) -> WorkspaceProber {
        WorkspaceProber::new(Arc::new(workspace))
    }

    fn autosar_workspace() -> InMemoryWorkspace {
        InMemoryWorkspace::new()
            .with_file("platform/s32g/autosar/EcuM_Callout_Stubs.c", "#include \"EcuM.h\"\n")
            .with_file("app/main.c", "#include \"Rte_Main.h\"\nint main(void) {}\n")
            .with_file("include/shm.h", "void* ShmM_MapOwner(uint32 size);\n")
            .with_file(
                "include/calib.h",
                "Std_ReturnType Calib_DatasetLoad(void);\nvoid* ShmM_MapOwner(uint32 size);\n",
            )
    }

    mod detection {
        use super::*;

        #[tokio::test]
        async fn empty_workspace_detects_nothing() {
            let analysis = prober(InMemoryWorkspace::new())
                .analyze(&CancellationToken::new())
                .await;
            assert!(analysis.is_empty());
        }

        #[tokio::test]
        async fn specific_variant_wins_over_board_fallback() {
            let variant = prober(autosar_workspace())
                .detect_variant(&CancellationToken::new())
                .await;
            assert_eq!(variant, Some(Variant::S32gAutosar));
        }

        #[tokio::test]
        async fn board_only_path_selects_linux_variant() {
            let workspace = InMemoryWorkspace::new().with_file("bsp/s32g2/linux/board.c", "");
            let variant = prober(workspace).detect_variant(&CancellationToken::new()).await;
            assert_eq!(variant, Some(Variant::S32gLinux));
        }

        #[tokio::test]
        async fn platform_from_entry_point() {
            let platform = prober(autosar_workspace())
                .detect_platform(&CancellationToken::new())
                .await;
            assert_eq!(platform, Some(Platform::Autosar));
        }

        #[tokio::test]
        async fn platform_scan_is_capped() {
            let mut workspace = InMemoryWorkspace::new();
            for i in 0..5 {
                workspace = workspace.with_file(format!("a{}/main.c", i), "void nothing(void);");
            }
            workspace = workspace.with_file("z/main.c", "#include <unistd.h>\n");

            let platform = prober(workspace).detect_platform(&CancellationToken::new()).await;
            assert_eq!(platform, None);
        }
    }

    mod candidates {
        use super::*;

        #[tokio::test]
        async fn candidates_are_deduplicated() {
            let found = prober(autosar_workspace())
                .find_candidate_functions(&CancellationToken::new())
                .await;
            assert_eq!(found.memory, vec!["ShmM_MapOwner"]);
            assert_eq!(found.dataset, vec!["Calib_DatasetLoad"]);
        }

        #[tokio::test]
        async fn autosar_compiler_abstractions_are_seen_through() {
            let workspace = InMemoryWorkspace::new().with_file(
                "include/NvM.h",
                "FUNC(Std_ReturnType, NVM_CODE) NvM_ReadBlock(NvM_BlockIdType BlockId);\n\
                 FUNC(P2VAR(void, AUTOMATIC, SHMM_APPL_DATA), SHMM_CODE) ShmM_MapOwner(uint32 Size);\n",
            );
            let found = prober(workspace)
                .find_candidate_functions(&CancellationToken::new())
                .await;
            assert_eq!(found.memory, vec!["ShmM_MapOwner"]);
            assert_eq!(found.dataset, vec!["NvM_ReadBlock"]);
        }

        #[tokio::test]
        async fn unreadable_headers_are_skipped() {
            let workspace = autosar_workspace().with_unreadable("include/broken.h");
            let found = prober(workspace)
                .find_candidate_functions(&CancellationToken::new())
                .await;
            assert_eq!(found.memory, vec!["ShmM_MapOwner"]);
        }

        #[tokio::test]
        async fn scan_cap_limits_files_read() {
            let workspace = InMemoryWorkspace::new()
                .with_file("a.h", "void* A_Alloc(void);")
                .with_file("b.h", "void* B_Alloc(void);");
            let limits = ProbeLimits {
                header_scan: 1,
                ..ProbeLimits::default()
            };
            let found = prober(workspace)
                .with_limits(limits)
                .find_candidate_functions(&CancellationToken::new())
                .await;
            assert_eq!(found.memory, vec!["A_Alloc"]);
        }
    }

    #[tokio::test]
    async fn existing_integration_is_listed_and_capped() {
        let mut workspace = InMemoryWorkspace::new();
        for i in 0..12 {
            workspace = workspace.with_file(format!("src/debug_unlock/f{:02}.c", i), "");
        }
        let found = prober(workspace)
            .find_existing_integration(&CancellationToken::new())
            .await;
        assert_eq!(found.len(), 10);
        assert_eq!(found[0], "src/debug_unlock/f00.c");
    }

    #[tokio::test]
    async fn cancelled_probe_returns_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let analysis = prober(autosar_workspace()).analyze(&cancel).await;
        assert!(analysis.is_empty());
    }

    proptest! {
        #[test]
        fn probing_arbitrary_headers_never_fails(
            contents in proptest::collection::vec(".{0,200}", 0..8)
        ) {
            let mut workspace = InMemoryWorkspace::new();
            for (i, text) in contents.iter().enumerate() {
                workspace = workspace.with_file(format!("inc/h{}.h", i), text.clone());
            }
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            let analysis = runtime.block_on(prober(workspace).analyze(&CancellationToken::new()));

            let mut memory = analysis.memory_candidates.clone();
            memory.sort();
            memory.dedup();
            prop_assert_eq!(memory.len(), analysis.memory_candidates.len());

            let mut dataset = analysis.dataset_candidates.clone();
            dataset.sort();
            dataset.dedup();
            prop_assert_eq!(dataset.len(), analysis.dataset_candidates.len());
        }
    }
}
