//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the wizard and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - the code-generation model
//! - `WorkspaceFiles` - read-only access to the user's project
//! - `SessionStore` - in-flight wizard sessions
//! - `ResponseSink` - streamed reply output

mod ai_provider;
mod response_sink;
mod session_store;
mod workspace_files;

pub use ai_provider::{
    AIError, AIProvider, ChunkStream, CompletionRequest, FinishReason, Message, MessageRole,
    ProviderInfo, RequestMetadata, StreamChunk, TokenUsage,
};
pub use response_sink::{ResponseSink, SinkError};
pub use session_store::{SessionStore, SessionStoreError};
pub use workspace_files::{WorkspaceError, WorkspaceFiles};
