//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! - `AnthropicProvider` - Anthropic Messages API with SSE streaming
//! - `MockAIProvider` - Scripted provider for tests

mod anthropic_provider;
mod mock_provider;

pub use anthropic_provider::{
    AnthropicConfig, AnthropicProvider, SseDecoder, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
