//! Mock AI Provider for testing.
//!
//! Provides a scripted implementation of the AIProvider port so the wizard
//! can be exercised end to end without a real model.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Errors before the first chunk or in the middle of a stream
//! - Simulated delays for cancellation testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("// debug_unlock_adapter.c\n")
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, ChunkStream, CompletionRequest, FinishReason, ProviderInfo, StreamChunk,
    TokenUsage,
};

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    /// Simulated latency before the first chunk.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion.
    Success { content: String },
    /// Stream `content`, then fail.
    PartialThenError { content: String, error: MockError },
    /// Fail before producing anything.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    ContentFiltered { reason: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::ContentFiltered { reason } => AIError::content_filtered(reason),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success {
            content: content.into(),
        })
    }

    /// Adds a response that fails after streaming `content`.
    pub fn with_partial_response(self, content: impl Into<String>, error: MockError) -> Self {
        self.push(MockResponse::PartialThenError {
            content: content.into(),
            error,
        })
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_provider_info(mut self, info: ProviderInfo) -> Self {
        self.info = info;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn push(self, response: MockResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: "Mock response".to_string(),
            })
    }

    /// Splits text into line chunks; concatenating them yields the input.
    fn line_chunks(content: &str) -> Vec<Result<StreamChunk, AIError>> {
        content
            .split_inclusive('\n')
            .map(|line| Ok(StreamChunk::content(line)))
            .collect()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn stream_complete(&self, request: CompletionRequest) -> Result<ChunkStream, AIError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success { content } => {
                let final_chunk = Ok(StreamChunk::final_chunk(
                    FinishReason::Stop,
                    TokenUsage::new(10, 20),
                ));
                let chunks = Self::line_chunks(&content);
                Ok(Box::pin(stream::iter(chunks).chain(stream::once(async { final_chunk }))))
            }
            MockResponse::PartialThenError { content, error } => {
                let failure: Result<StreamChunk, AIError> = Err(error.into());
                let chunks = Self::line_chunks(&content);
                Ok(Box::pin(stream::iter(chunks).chain(stream::once(async { failure }))))
            }
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
