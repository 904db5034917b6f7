//! AI Provider Port - Interface to the code-generation model.
//!
//! The wizard only needs one thing from a model: turn a finished integration
//! configuration into source text, streamed back in order. This port keeps
//! the generation handler independent of any particular vendor.
//!
//! # Design
//!
//! - Streaming completions; errors before the first chunk are kept apart
//!   from errors inside the stream
//! - Provider-agnostic message format
//! - Error classification so callers can tell "no model available" apart
//!   from failures worth surfacing

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

/// Boxed stream of completion chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, AIError>> + Send>>;

/// Port for text-generation model interactions.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate a streaming completion.
    ///
    /// Errors returned here happen before any text was produced; errors
    /// inside the stream happen after.
    async fn stream_complete(&self, request: CompletionRequest) -> Result<ChunkStream, AIError>;

    /// Get provider information (name, model, capabilities).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for a completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Conversation messages.
    pub messages: Vec<Message>,
    /// System prompt with the domain knowledge.
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
    /// Request metadata for tracing.
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
            metadata,
        }
    }

    /// Adds a message to the conversation.
    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(Message::new(role, content));
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Request metadata for tracing.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// Session the request was made for, rendered as its store key.
    pub session: String,
    /// Trace ID correlating log lines of one generation.
    pub trace_id: String,
}

impl RequestMetadata {
    pub fn new(session: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            trace_id: trace_id.into(),
        }
    }
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    Stop,
    /// Hit max_tokens limit.
    Length,
    /// Content was filtered for safety.
    ContentFilter,
    Error,
}

/// Streaming chunk from a completion.
#[derive(Debug, Clone)]
pub struct StreamChunk {
    /// New content in this chunk.
    pub delta: String,
    /// If present, generation is complete.
    pub finish_reason: Option<FinishReason>,
    /// Token usage (only present on the final chunk).
    pub usage: Option<TokenUsage>,
}

impl StreamChunk {
    pub fn content(delta: impl Into<String>) -> Self {
        Self {
            delta: delta.into(),
            finish_reason: None,
            usage: None,
        }
    }

    pub fn final_chunk(finish_reason: FinishReason, usage: TokenUsage) -> Self {
        Self {
            delta: String::new(),
            finish_reason: Some(finish_reason),
            usage: Some(usage),
        }
    }

    pub fn is_final(&self) -> bool {
        self.finish_reason.is_some()
    }
}

/// Provider information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "anthropic").
    pub name: String,
    /// Model identifier.
    pub model: String,
    pub supports_streaming: bool,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            supports_streaming: true,
        }
    }

    pub fn with_streaming(mut self, supports: bool) -> Self {
        self.supports_streaming = supports;
        self
    }
}

/// AI provider errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AIError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Prompt exceeds the model's context window.
    #[error("context too long: {tokens} tokens exceeds {max} limit")]
    ContextTooLong { tokens: u32, max: u32 },

    /// Content was filtered for safety.
    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    /// Provider is unavailable or not configured.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn context_too_long(tokens: u32, max: u32) -> Self {
        Self::ContextTooLong { tokens, max }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }

    /// Returns true if no model could be reached at all, as opposed to a
    /// model rejecting or mangling the request.
    pub fn is_unavailable(&self) -> bool {
        self.is_retryable() || matches!(self, AIError::AuthenticationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_metadata() -> RequestMetadata {
        RequestMetadata::new("turn:3", "trace-123")
    }

    #[test]
    fn completion_request_builder_works() {
        let request = CompletionRequest::new(test_metadata())
            .with_message(MessageRole::User, "platform: posix")
            .with_system_prompt("You write adapters")
            .with_max_tokens(100)
            .with_temperature(0.2);

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.system_prompt, Some("You write adapters".to_string()));
        assert_eq!(request.max_tokens, Some(100));
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.metadata.session, "turn:3");
    }

    #[test]
    fn token_usage_calculates_total() {
        let usage = TokenUsage::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
    }

    #[test]
    fn stream_chunk_final_has_usage() {
        let chunk = StreamChunk::final_chunk(FinishReason::Stop, TokenUsage::new(10, 5));
        assert!(chunk.is_final());
        assert_eq!(chunk.delta, "");
        assert!(!StreamChunk::content("x").is_final());
    }

    #[test]
    fn ai_error_retryable_classification() {
        assert!(AIError::rate_limited(30).is_retryable());
        assert!(AIError::unavailable("down").is_retryable());
        assert!(AIError::network("reset").is_retryable());
        assert!(AIError::Timeout { timeout_secs: 30 }.is_retryable());

        assert!(!AIError::AuthenticationFailed.is_retryable());
        assert!(!AIError::context_too_long(100, 50).is_retryable());
        assert!(!AIError::Cancelled.is_retryable());
    }

    #[test]
    fn unavailability_includes_auth_failures() {
        assert!(AIError::AuthenticationFailed.is_unavailable());
        assert!(AIError::unavailable("no key").is_unavailable());
        assert!(!AIError::parse("bad json").is_unavailable());
        assert!(!AIError::content_filtered("nope").is_unavailable());
    }

    #[test]
    fn message_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MessageRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&MessageRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
