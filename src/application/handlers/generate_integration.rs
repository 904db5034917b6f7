//! GenerateIntegrationHandler - streams generated adapter code for a
//! finished configuration.
//!
//! The model's text is forwarded chunk by chunk, unmodified and in arrival
//! order. When no model can be reached the user gets a warning and the
//! captured configuration instead, so a finished wizard run always ends
//! with something actionable.

use std::sync::Arc;

use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::wizard::{prompts, IntegrationConfig, SessionKey};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, FinishReason, MessageRole, RequestMetadata,
    ResponseSink, SinkError,
};

/// Static knowledge about the debug-unlock core sent with every request.
pub const DOMAIN_KNOWLEDGE: &str = "\
You generate C integration code for the debug-unlock core.

The core decides at startup whether debug features are unlocked. It reads a \
debug level from a magic flag: a pair of 32-bit words stored together, the \
level and its bitwise complement. A pair whose second word is not the \
complement of the first is treated as \"locked\".

The core calls three adapter functions that the integrator must provide:

1. `DebugUnlock_MapFlag` returns a pointer to the shared memory region holding \
the magic flag, or NULL. Implement it on top of the project's memory \
allocation function.
2. `DebugUnlock_LoadDataset` copies the persisted dataset containing the \
configured debug level into a caller buffer and returns 0 on success. \
Implement it on top of the project's dataset loading function.
3. `DebugUnlock_GetAltLevel` returns an alternative debug level, or -1 when \
none is available. If the configuration says `none`, generate a stub that \
always returns -1.

Adapters reconcile the project's existing function signatures with these \
signatures; never modify the project's functions. Produce one Markdown \
document: a header file and a source file in fenced code blocks, each \
preceded by its path under the integration directory, followed by a short \
list of integration steps.";

/// Command to generate integration files.
#[derive(Debug, Clone)]
pub struct GenerateIntegrationCommand {
    pub config: IntegrationConfig,
    pub session: SessionKey,
}

/// How a generation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The model's output was streamed to the end.
    Generated { chunks: usize, truncated: bool },
    /// No output was produced; the configuration summary was sent instead.
    Fallback { reason: String },
    /// The stream broke off after some output.
    Interrupted { chunks: usize, reason: String },
}

/// Result of a generation.
#[derive(Debug, Clone)]
pub struct GenerateIntegrationResult {
    pub outcome: GenerationOutcome,
}

/// Errors that stop a generation. Model failures are not among them.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Generation cancelled")]
    Cancelled,

    #[error("Failed to serialize configuration: {0}")]
    Serialization(String),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Request shaping for the model call.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: None,
            temperature: Some(0.2),
        }
    }
}

/// Handler for integration code generation.
pub struct GenerateIntegrationHandler {
    provider: Option<Arc<dyn AIProvider>>,
    settings: GenerationSettings,
}

impl GenerateIntegrationHandler {
    /// `None` means no model is configured; every run falls back.
    pub fn new(provider: Option<Arc<dyn AIProvider>>) -> Self {
        Self {
            provider,
            settings: GenerationSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builds the model request for a configuration.
    pub fn build_request(
        &self,
        cmd: &GenerateIntegrationCommand,
    ) -> Result<CompletionRequest, GenerationError> {
        let yaml = cmd
            .config
            .to_yaml()
            .map_err(|e| GenerationError::Serialization(e.to_string()))?;

        let message = format!(
            "Generate the debug-unlock integration layer for this configuration. \
             Place all files under `{}`.\n\n```yaml\n{}```\n",
            cmd.config.integration_path, yaml
        );

        let metadata = RequestMetadata::new(cmd.session.to_string(), Uuid::new_v4().to_string());
        let mut request = CompletionRequest::new(metadata)
            .with_system_prompt(DOMAIN_KNOWLEDGE)
            .with_message(MessageRole::User, message);
        if let Some(max_tokens) = self.settings.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        if let Some(temperature) = self.settings.temperature {
            request = request.with_temperature(temperature);
        }
        Ok(request)
    }

    pub async fn handle(
        &self,
        cmd: GenerateIntegrationCommand,
        sink: &dyn ResponseSink,
        cancel: &CancellationToken,
    ) -> Result<GenerateIntegrationResult, GenerationError> {
        let Some(provider) = &self.provider else {
            return self
                .fall_back(&cmd.config, "no model is configured", sink)
                .await;
        };

        let request = self.build_request(&cmd)?;
        let trace_id = request.metadata.trace_id.clone();
        let provider_name = provider.provider_info().name;
        info!(%trace_id, provider = %provider_name, session = %cmd.session, "Generating integration");

        let opened = tokio::select! {
            _ = cancel.cancelled() => return Err(GenerationError::Cancelled),
            opened = provider.stream_complete(request) => opened,
        };

        let mut stream = match opened {
            Ok(stream) => stream,
            Err(AIError::Cancelled) => return Err(GenerationError::Cancelled),
            Err(err) => {
                warn!(%trace_id, error = %err, "Generation request failed");
                if err.is_unavailable() {
                    return self.fall_back(&cmd.config, &err.to_string(), sink).await;
                }
                sink.markdown(&prompts::generation_failed(&err.to_string(), &cmd.config))
                    .await?;
                return Ok(GenerateIntegrationResult {
                    outcome: GenerationOutcome::Fallback {
                        reason: err.to_string(),
                    },
                });
            }
        };

        let mut chunks = 0;
        let mut truncated = false;

        loop {
            let next = tokio::select! {
                _ = cancel.cancelled() => return Err(GenerationError::Cancelled),
                next = stream.next() => next,
            };

            match next {
                None => break,
                Some(Ok(chunk)) => {
                    if !chunk.delta.is_empty() {
                        sink.markdown(&chunk.delta).await?;
                        chunks += 1;
                    }
                    if chunk.finish_reason == Some(FinishReason::Length) {
                        truncated = true;
                    }
                }
                Some(Err(AIError::Cancelled)) => return Err(GenerationError::Cancelled),
                Some(Err(err)) => {
                    warn!(%trace_id, chunks, error = %err, "Generation stream interrupted");
                    if chunks == 0 {
                        return self.fall_back(&cmd.config, &err.to_string(), sink).await;
                    }
                    sink.markdown(&prompts::generation_interrupted(&err.to_string()))
                        .await?;
                    return Ok(GenerateIntegrationResult {
                        outcome: GenerationOutcome::Interrupted {
                            chunks,
                            reason: err.to_string(),
                        },
                    });
                }
            }
        }

        if truncated {
            sink.markdown(&prompts::generation_truncated()).await?;
        }
        info!(%trace_id, chunks, truncated, "Generation complete");

        Ok(GenerateIntegrationResult {
            outcome: GenerationOutcome::Generated { chunks, truncated },
        })
    }

    async fn fall_back(
        &self,
        config: &IntegrationConfig,
        reason: &str,
        sink: &dyn ResponseSink,
    ) -> Result<GenerateIntegrationResult, GenerationError> {
        sink.markdown(&prompts::generation_unavailable(reason, config))
            .await?;
        Ok(GenerateIntegrationResult {
            outcome: GenerationOutcome::Fallback {
                reason: reason.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::response::BufferedResponseSink;
    use crate::domain::wizard::Platform;
    use std::time::Duration;

    fn command() -> GenerateIntegrationCommand {
        GenerateIntegrationCommand {
            config: IntegrationConfig {
                platform: Some(Platform::Posix),
                variant: None,
                integration_path: "integration/<board>/posix/debug_unlock".to_string(),
                memory_fn: "ShmM_MapOwner".to_string(),
                dataset_fn: "MyReader".to_string(),
                alt_fn: "none".to_string(),
            },
            session: SessionKey::TurnCount(7),
        }
    }

    fn handler(provider: MockAIProvider) -> GenerateIntegrationHandler {
        GenerateIntegrationHandler::new(Some(Arc::new(provider)))
    }

    #[tokio::test]
    async fn streams_model_output_verbatim() {
        let output = "### debug_unlock_adapter.h\n```c\nvoid* DebugUnlock_MapFlag(void);\n```\n";
        let sink = BufferedResponseSink::new();

        let result = handler(MockAIProvider::new().with_response(output))
            .handle(command(), &sink, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(sink.text().await, output);
        assert_eq!(
            result.outcome,
            GenerationOutcome::Generated {
                chunks: 4,
                truncated: false
            }
        );
    }

    #[tokio::test]
    async fn request_carries_knowledge_and_configuration() {
        let provider = MockAIProvider::new();
        let handler = GenerateIntegrationHandler::new(Some(Arc::new(provider.clone())));

        handler
            .handle(command(), &BufferedResponseSink::new(), &CancellationToken::new())
            .await
            .unwrap();

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system_prompt.as_deref(), Some(DOMAIN_KNOWLEDGE));
        let message = &calls[0].messages[0].content;
        assert!(message.contains("memory_fn: ShmM_MapOwner"));
        assert!(message.contains("dataset_fn: MyReader"));
        assert!(message.contains("alt_fn: none"));
        assert!(message.contains("platform: posix"));
        assert_eq!(calls[0].metadata.session, "turn:7");
    }

    #[tokio::test]
    async fn missing_provider_falls_back_to_summary() {
        let sink = BufferedResponseSink::new();
        let result = GenerateIntegrationHandler::new(None)
            .handle(command(), &sink, &CancellationToken::new())
            .await
            .unwrap();

        let text = sink.text().await;
        assert!(text.contains("No code generation model"));
        assert!(text.contains("`MyReader`"));
        assert!(matches!(result.outcome, GenerationOutcome::Fallback { .. }));
    }

    #[tokio::test]
    async fn unavailable_provider_falls_back_to_summary() {
        let sink = BufferedResponseSink::new();
        let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);

        handler(provider)
            .handle(command(), &sink, &CancellationToken::new())
            .await
            .unwrap();

        assert!(sink.text().await.contains("Captured configuration"));
    }

    #[tokio::test]
    async fn rejected_request_reports_failure_with_summary() {
        let sink = BufferedResponseSink::new();
        let provider = MockAIProvider::new().with_error(MockError::ContentFiltered {
            reason: "policy".to_string(),
        });

        handler(provider)
            .handle(command(), &sink, &CancellationToken::new())
            .await
            .unwrap();

        let text = sink.text().await;
        assert!(text.contains("Code generation failed"));
        assert!(text.contains("Captured configuration"));
    }

    #[tokio::test]
    async fn mid_stream_failure_keeps_partial_output() {
        let sink = BufferedResponseSink::new();
        let provider = MockAIProvider::new().with_partial_response(
            "// partial\n",
            MockError::Network {
                message: "connection reset".to_string(),
            },
        );

        let result = handler(provider)
            .handle(command(), &sink, &CancellationToken::new())
            .await
            .unwrap();

        let text = sink.text().await;
        assert!(text.starts_with("// partial\n"));
        assert!(text.contains("Generation was interrupted"));
        assert!(matches!(result.outcome, GenerationOutcome::Interrupted { chunks: 1, .. }));
    }

    #[tokio::test]
    async fn cancellation_stops_generation() {
        let sink = BufferedResponseSink::new();
        let provider = MockAIProvider::new().with_delay(Duration::from_secs(30));
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = handler(provider).handle(command(), &sink, &cancel).await;

        assert!(matches!(result, Err(GenerationError::Cancelled)));
        assert_eq!(sink.text().await, "");
    }
}
