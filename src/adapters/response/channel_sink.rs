//! Channel-backed response sink.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::ports::{ResponseSink, SinkError};

/// Sends each fragment to a receiver that renders it.
#[derive(Debug, Clone)]
pub struct ChannelResponseSink {
    sender: mpsc::Sender<String>,
}

impl ChannelResponseSink {
    /// Creates a sink and the receiver its fragments arrive on.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl ResponseSink for ChannelResponseSink {
    async fn markdown(&self, text: &str) -> Result<(), SinkError> {
        if text.is_empty() {
            return Ok(());
        }
        self.sender
            .send(text.to_string())
            .await
            .map_err(|_| SinkError::Closed)
    }
}
