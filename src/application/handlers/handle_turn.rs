//! HandleTurnHandler - processes one inbound message end to end.
//!
//! Resolves the session, dispatches directives, runs the dialogue engine,
//! triggers generation and commits the new state. The state is computed on
//! a copy and saved only once the whole turn succeeded, so a cancelled or
//! failed turn leaves the session as it was.

use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::generate_integration::{
    GenerateIntegrationCommand, GenerateIntegrationHandler, GenerationError, GenerationOutcome,
};
use super::inspect_workspace::InspectWorkspaceHandler;
use super::wrap_function::{WrapFunctionCommand, WrapFunctionHandler};
use crate::application::prober::WorkspaceProber;
use crate::domain::foundation::ValidationError;
use crate::domain::wizard::{
    DialogueEngine, Directive, SessionKey, SessionState, TurnOutcome, WizardStep,
};
use crate::domain::workspace::WorkspaceAnalysis;
use crate::ports::{ResponseSink, SessionStore, SessionStoreError, SinkError};

/// Command to process one inbound message.
#[derive(Debug, Clone)]
pub struct HandleTurnCommand {
    pub key: SessionKey,
    pub text: String,
}

impl HandleTurnCommand {
    pub fn new(key: SessionKey, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
        }
    }
}

/// What a turn did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnAction {
    /// Fed to the dialogue engine (including `begin-integration`).
    Dialogue,
    /// `inspect-workspace`.
    Inspect,
    /// `wrap-function`.
    WrapFunction,
}

/// Result of a successful turn.
#[derive(Debug, Clone)]
pub struct HandleTurnResult {
    pub action: TurnAction,
    /// Session as committed to the store.
    pub state: SessionState,
    /// Set when the turn completed the configuration.
    pub generation: Option<GenerationOutcome>,
}

/// Errors that abort a turn. Invalid user input is not among them.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("session store error: {0}")]
    Store(#[from] SessionStoreError),

    #[error("failed to send response: {0}")]
    Sink(#[from] SinkError),

    #[error("turn cancelled")]
    Cancelled,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for TurnError {
    fn from(err: ValidationError) -> Self {
        TurnError::Internal(err.to_string())
    }
}

impl From<GenerationError> for TurnError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Cancelled => TurnError::Cancelled,
            GenerationError::Sink(sink) => TurnError::Sink(sink),
            GenerationError::Serialization(message) => TurnError::Internal(message),
        }
    }
}

/// Handler for inbound messages.
pub struct HandleTurnHandler {
    store: Arc<dyn SessionStore>,
    prober: Arc<WorkspaceProber>,
    engine: DialogueEngine,
    inspect: InspectWorkspaceHandler,
    wrap: WrapFunctionHandler,
    generate: GenerateIntegrationHandler,
}

impl HandleTurnHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        prober: Arc<WorkspaceProber>,
        engine: DialogueEngine,
        generate: GenerateIntegrationHandler,
    ) -> Self {
        Self {
            store,
            inspect: InspectWorkspaceHandler::new(prober.clone()),
            prober,
            engine,
            wrap: WrapFunctionHandler::new(),
            generate,
        }
    }

    /// Processes a turn, formatting any error as a reply line.
    ///
    /// This is the outbound boundary: nothing escapes it.
    pub async fn respond(
        &self,
        cmd: HandleTurnCommand,
        sink: &dyn ResponseSink,
        cancel: &CancellationToken,
    ) -> Option<HandleTurnResult> {
        let key = cmd.key.clone();
        match self.handle(cmd, sink, cancel).await {
            Ok(result) => Some(result),
            Err(TurnError::Cancelled) => {
                info!(%key, "Turn cancelled");
                let _ = sink.markdown("\n\n_Cancelled._\n").await;
                None
            }
            Err(err) => {
                error!(%key, error = %err, "Turn failed");
                let _ = sink
                    .markdown(&format!("\n\n⚠️ Something went wrong: {}\n", err))
                    .await;
                None
            }
        }
    }

    /// Processes a turn.
    pub async fn handle(
        &self,
        cmd: HandleTurnCommand,
        sink: &dyn ResponseSink,
        cancel: &CancellationToken,
    ) -> Result<HandleTurnResult, TurnError> {
        let state = self.store.get_or_create(&cmd.key).await?;
        debug!(key = %cmd.key, step = ?state.step(), "Turn received");

        let (action, outcome) = match Directive::parse(&cmd.text) {
            Some(Directive::InspectWorkspace) => {
                self.inspect.handle(sink, cancel).await?;
                (TurnAction::Inspect, None)
            }
            Some(Directive::WrapFunction { name }) => {
                self.wrap.handle(WrapFunctionCommand { name }, sink).await?;
                (TurnAction::WrapFunction, None)
            }
            Some(Directive::BeginIntegration { token }) => {
                let step = state.step();
                let workspace = if step == WizardStep::AwaitingStart
                    || step.needs_workspace_analysis()
                {
                    self.analyze(cancel).await?
                } else {
                    WorkspaceAnalysis::empty()
                };
                let outcome = self.engine.begin(&state, &token, &workspace)?;
                (TurnAction::Dialogue, Some(outcome))
            }
            None => {
                let workspace = if state.step().needs_workspace_analysis() {
                    self.analyze(cancel).await?
                } else {
                    WorkspaceAnalysis::empty()
                };
                let outcome = self.engine.respond(&state, &cmd.text, &workspace)?;
                (TurnAction::Dialogue, Some(outcome))
            }
        };

        let Some(TurnOutcome {
            state: next,
            reply,
            generate,
        }) = outcome
        else {
            self.store.save(&cmd.key, &state).await?;
            return Ok(HandleTurnResult {
                action,
                state,
                generation: None,
            });
        };

        sink.markdown(&reply).await?;

        let mut committed = next;
        let mut generation = None;
        if let Some(config) = generate {
            let result = self
                .generate
                .handle(
                    GenerateIntegrationCommand {
                        config,
                        session: cmd.key.clone(),
                    },
                    sink,
                    cancel,
                )
                .await?;
            generation = Some(result.outcome);
            committed.reset()?;
        }

        self.store.save(&cmd.key, &committed).await?;
        debug!(key = %cmd.key, step = ?committed.step(), "Turn committed");

        Ok(HandleTurnResult {
            action,
            state: committed,
            generation,
        })
    }

    async fn analyze(&self, cancel: &CancellationToken) -> Result<WorkspaceAnalysis, TurnError> {
        let analysis = self.prober.analyze(cancel).await;
        if cancel.is_cancelled() {
            return Err(TurnError::Cancelled);
        }
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::response::BufferedResponseSink;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::adapters::workspace::InMemoryWorkspace;
    use async_trait::async_trait;
    use std::time::Duration;

    struct FailingStore;

    #[async_trait]
    impl SessionStore for FailingStore {
        async fn get_or_create(&self, _key: &SessionKey) -> Result<SessionState, SessionStoreError> {
            Err(SessionStoreError::Unavailable("offline".to_string()))
        }

        async fn save(&self, _key: &SessionKey, _state: &SessionState) -> Result<(), SessionStoreError> {
            Err(SessionStoreError::Unavailable("offline".to_string()))
        }

        async fn clear(&self) -> Result<(), SessionStoreError> {
            Ok(())
        }
    }

    fn handler_with(store: Arc<dyn SessionStore>) -> HandleTurnHandler {
        handler_for(store, InMemoryWorkspace::new(), MockAIProvider::new())
    }

    fn handler_for(
        store: Arc<dyn SessionStore>,
        workspace: InMemoryWorkspace,
        provider: MockAIProvider,
    ) -> HandleTurnHandler {
        let prober = Arc::new(WorkspaceProber::new(Arc::new(workspace)));
        HandleTurnHandler::new(
            store,
            prober,
            DialogueEngine::default(),
            GenerateIntegrationHandler::new(Some(Arc::new(provider))),
        )
    }

    async fn drive(handler: &HandleTurnHandler, sink: &BufferedResponseSink, turns: &[&str]) {
        for (count, text) in turns.iter().enumerate() {
            handler
                .handle(
                    HandleTurnCommand::new(SessionKey::TurnCount(count as u64), *text),
                    sink,
                    &CancellationToken::new(),
                )
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn begin_commits_new_step() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = handler_with(store.clone());
        let sink = BufferedResponseSink::new();

        let result = handler
            .handle(
                HandleTurnCommand::new(SessionKey::TurnCount(0), "begin-integration posix"),
                &sink,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.action, TurnAction::Dialogue);
        assert_eq!(result.state.step(), WizardStep::AwaitingMemoryFn);
        let stored = store.peek(&SessionKey::TurnCount(1)).await.unwrap();
        assert_eq!(stored.step(), WizardStep::AwaitingMemoryFn);
    }

    #[tokio::test]
    async fn cancelled_turn_commits_nothing() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = handler_with(store.clone());
        let sink = BufferedResponseSink::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = handler
            .handle(
                HandleTurnCommand::new(SessionKey::TurnCount(0), "begin-integration posix"),
                &sink,
                &cancel,
            )
            .await;

        assert!(matches!(result, Err(TurnError::Cancelled)));
        let stored = store.peek(&SessionKey::TurnCount(1)).await.unwrap();
        assert_eq!(stored.step(), WizardStep::AwaitingStart);
        assert!(sink.text().await.is_empty());
    }

    #[tokio::test]
    async fn cancel_during_generation_keeps_alt_step() {
        let store = Arc::new(InMemorySessionStore::new());
        let provider = MockAIProvider::new().with_delay(Duration::from_secs(30));
        let handler = handler_for(store.clone(), InMemoryWorkspace::new(), provider);
        let sink = BufferedResponseSink::new();
        drive(
            &handler,
            &sink,
            &["begin-integration posix", "ShmM_MapOwner", "MyReader"],
        )
        .await;

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });
        let result = handler
            .handle(
                HandleTurnCommand::new(SessionKey::TurnCount(3), "none"),
                &sink,
                &cancel,
            )
            .await;

        assert!(matches!(result, Err(TurnError::Cancelled)));
        let stored = store.peek(&SessionKey::TurnCount(4)).await.unwrap();
        assert_eq!(stored.step(), WizardStep::AwaitingAltFn);
        assert_eq!(stored.alt_fn(), None);
        assert_eq!(stored.dataset_fn(), Some("MyReader"));
    }

    #[tokio::test]
    async fn begin_mid_flow_reprompts_with_detected_candidates() {
        let store = Arc::new(InMemorySessionStore::new());
        let workspace = InMemoryWorkspace::new()
            .with_file("include/shm.h", "void* ShmM_MapOwner(uint32 size);\n");
        let handler = handler_for(store.clone(), workspace, MockAIProvider::new());
        let sink = BufferedResponseSink::new();
        drive(&handler, &sink, &["begin-integration posix"]).await;

        let mid_flow = BufferedResponseSink::new();
        let result = handler
            .handle(
                HandleTurnCommand::new(SessionKey::TurnCount(1), "begin-integration posix"),
                &mid_flow,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.state.step(), WizardStep::AwaitingMemoryFn);
        assert!(mid_flow.text().await.contains("- `ShmM_MapOwner`"));
    }

    #[tokio::test]
    async fn respond_formats_errors_at_the_boundary() {
        let handler = handler_with(Arc::new(FailingStore));
        let sink = BufferedResponseSink::new();

        let result = handler
            .respond(
                HandleTurnCommand::new(SessionKey::TurnCount(0), "hello"),
                &sink,
                &CancellationToken::new(),
            )
            .await;

        assert!(result.is_none());
        let text = sink.text().await;
        assert!(text.contains("Something went wrong"));
        assert!(text.contains("offline"));
    }

    #[tokio::test]
    async fn directives_leave_session_untouched() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = handler_with(store.clone());
        let sink = BufferedResponseSink::new();
        let cancel = CancellationToken::new();

        handler
            .handle(
                HandleTurnCommand::new(SessionKey::TurnCount(0), "begin-integration posix"),
                &sink,
                &cancel,
            )
            .await
            .unwrap();
        let result = handler
            .handle(
                HandleTurnCommand::new(SessionKey::TurnCount(1), "/wrap ShmM_MapOwner"),
                &sink,
                &cancel,
            )
            .await
            .unwrap();

        assert_eq!(result.action, TurnAction::WrapFunction);
        assert_eq!(result.state.step(), WizardStep::AwaitingMemoryFn);
        assert_eq!(result.state.memory_fn(), None);
    }
}
