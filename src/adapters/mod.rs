//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Anthropic and mock model providers
//! - `response` - Reply sinks (channel, buffer)
//! - `storage` - In-memory session store
//! - `workspace` - Local directory and in-memory workspaces

pub mod ai;
pub mod response;
pub mod storage;
pub mod workspace;

pub use ai::{AnthropicConfig, AnthropicProvider, MockAIProvider};
pub use response::{BufferedResponseSink, ChannelResponseSink};
pub use storage::InMemorySessionStore;
pub use workspace::{InMemoryWorkspace, LocalWorkspace};
