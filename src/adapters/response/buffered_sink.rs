//! In-memory response sink.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::ports::{ResponseSink, SinkError};

/// Collects fragments so callers can inspect a whole reply.
#[derive(Debug, Clone, Default)]
pub struct BufferedResponseSink {
    fragments: Arc<Mutex<Vec<String>>>,
}

impl BufferedResponseSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All fragments joined.
    pub async fn text(&self) -> String {
        self.fragments.lock().await.concat()
    }

    pub async fn fragments(&self) -> Vec<String> {
        self.fragments.lock().await.clone()
    }

    /// Returns the collected text and empties the buffer.
    pub async fn take(&self) -> String {
        let mut fragments = self.fragments.lock().await;
        std::mem::take(&mut *fragments).concat()
    }
}

#[async_trait]
impl ResponseSink for BufferedResponseSink {
    async fn markdown(&self, text: &str) -> Result<(), SinkError> {
        self.fragments.lock().await.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn take_drains_buffer() {
        let sink = BufferedResponseSink::new();
        sink.markdown("a").await.unwrap();
        sink.markdown("b").await.unwrap();

        assert_eq!(sink.fragments().await.len(), 2);
        assert_eq!(sink.take().await, "ab");
        assert_eq!(sink.text().await, "");
    }
}
