//! Response Sink Port - where a turn's Markdown output goes.
//!
//! Replies are streamed: a turn may push many fragments, in order, and the
//! host renders them as they arrive.

use async_trait::async_trait;

/// Errors that can occur while emitting output.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Response receiver closed")]
    Closed,

    #[error("IO error: {0}")]
    Io(String),
}

/// Port for emitting reply text.
#[async_trait]
pub trait ResponseSink: Send + Sync {
    /// Appends a Markdown fragment to the current reply.
    async fn markdown(&self, text: &str) -> Result<(), SinkError>;
}
