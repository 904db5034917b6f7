//! InspectWorkspaceHandler - reports integration files already present.
//!
//! Stateless: the session is neither read nor changed.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::handle_turn::TurnError;
use crate::application::prober::WorkspaceProber;
use crate::domain::wizard::{prompts, Platform, Variant};
use crate::ports::ResponseSink;

/// Result of an inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectWorkspaceResult {
    pub existing: Vec<String>,
    pub platform: Option<Platform>,
    pub variant: Option<Variant>,
}

/// Handler for `inspect-workspace`.
pub struct InspectWorkspaceHandler {
    prober: Arc<WorkspaceProber>,
}

impl InspectWorkspaceHandler {
    pub fn new(prober: Arc<WorkspaceProber>) -> Self {
        Self { prober }
    }

    pub async fn handle(
        &self,
        sink: &dyn ResponseSink,
        cancel: &CancellationToken,
    ) -> Result<InspectWorkspaceResult, TurnError> {
        let existing = self.prober.find_existing_integration(cancel).await;
        let platform = self.prober.detect_platform(cancel).await;
        let variant = self.prober.detect_variant(cancel).await;

        if cancel.is_cancelled() {
            return Err(TurnError::Cancelled);
        }

        sink.markdown(&prompts::inspect_report(&existing, platform, variant))
            .await?;

        Ok(InspectWorkspaceResult {
            existing,
            platform,
            variant,
        })
    }
}
