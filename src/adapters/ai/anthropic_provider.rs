//! Anthropic Provider - Implementation of AIProvider for Anthropic's Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-sonnet-4-20250514")
//!     .with_base_url("https://api.anthropic.com");
//!
//! let provider = AnthropicProvider::new(config)?;
//! ```
//!
//! # Streaming
//!
//! Uses Server-Sent Events with Anthropic's event names
//! (`content_block_delta`, `message_delta`, `error`). Network chunks do not
//! align with events, so `SseDecoder` buffers bytes until a blank line ends
//! an event.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::ports::{
    AIError, AIProvider, ChunkStream, CompletionRequest, FinishReason, MessageRole, ProviderInfo,
    StreamChunk, TokenUsage,
};

/// Default model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Retries on transient failures while opening the stream.
    pub max_retries: u32,
    /// First backoff delay; doubles on every retry.
    pub retry_base_delay: Duration,
    /// Used when the request does not set `max_tokens`.
    pub default_max_tokens: u32,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
            max_retries: 3,
            retry_base_delay: Duration::from_secs(1),
            default_max_tokens: 8192,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    pub fn with_default_max_tokens(mut self, max_tokens: u32) -> Self {
        self.default_max_tokens = max_tokens;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider with the given configuration.
    pub fn new(config: AnthropicConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to Anthropic's format.
    fn to_anthropic_request(&self, request: &CompletionRequest, stream: bool) -> AnthropicRequest {
        // System text travels in its own field, not as a message.
        let messages = request
            .messages
            .iter()
            .filter_map(|msg| {
                let role = match msg.role {
                    MessageRole::System => return None,
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                };
                Some(AnthropicMessage {
                    role: role.to_string(),
                    content: msg.content.clone(),
                })
            })
            .collect();

        AnthropicRequest {
            model: self.config.model.clone(),
            messages,
            system: request.system_prompt.clone(),
            max_tokens: request.max_tokens.unwrap_or(self.config.default_max_tokens),
            temperature: request.temperature,
            stream: Some(stream),
        }
    }

    async fn send(&self, request: &CompletionRequest, stream: bool) -> Result<Response, AIError> {
        if request.messages.is_empty() {
            return Err(AIError::InvalidRequest("request has no messages".to_string()));
        }
        let body = self.to_anthropic_request(request, stream);

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })?;

        Self::check_status(response).await
    }

    /// Maps non-success statuses to errors.
    async fn check_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(Self::parse_retry_after(&error_body))),
            400 => {
                if error_body.contains("prompt is too long") {
                    Err(AIError::context_too_long(0, 0))
                } else {
                    Err(AIError::InvalidRequest(error_body))
                }
            }
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses "try again in Ns" out of an error body, defaulting to 60s.
    fn parse_retry_after(error_body: &str) -> u32 {
        let message = serde_json::from_str::<serde_json::Value>(error_body)
            .ok()
            .and_then(|v| v.get("error")?.get("message")?.as_str().map(str::to_string));

        message
            .as_deref()
            .and_then(|s| s.split("try again in ").nth(1))
            .and_then(|rest| {
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse().ok()
            })
            .unwrap_or(60)
    }
}

/// Runs `op` until it succeeds, fails with a non-retryable error, or
/// `max_retries` retries have been spent. Delays double from `base_delay`.
async fn with_retries<T, F, Fut>(
    max_retries: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, AIError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AIError>>,
{
    let mut attempt = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < max_retries => {
                let delay = base_delay.saturating_mul(1 << attempt.min(16));
                warn!(error = %err, attempt, ?delay, "Anthropic request failed, retrying");
                sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

fn finish_reason(stop_reason: Option<&str>) -> FinishReason {
    match stop_reason {
        Some("max_tokens") => FinishReason::Length,
        Some("refusal") => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    }
}

#[async_trait]
impl AIProvider for AnthropicProvider {
    async fn stream_complete(&self, request: CompletionRequest) -> Result<ChunkStream, AIError> {
        let pending = &request;
        let response = with_retries(
            self.config.max_retries,
            self.config.retry_base_delay,
            move || self.send(pending, true),
        )
        .await?;
        debug!(
            model = %self.config.model,
            trace_id = %request.metadata.trace_id,
            "Anthropic stream opened"
        );

        let stream = response
            .bytes_stream()
            .scan(SseDecoder::new(), |decoder, chunk| {
                let items = match chunk {
                    Ok(bytes) => decoder.push(&bytes),
                    Err(e) => vec![Err(AIError::network(format!("Stream error: {}", e)))],
                };
                futures::future::ready(Some(stream::iter(items)))
            })
            .flatten();

        Ok(Box::pin(stream))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("anthropic", &self.config.model).with_streaming(true)
    }
}

/// Incremental decoder for Anthropic's SSE stream.
///
/// Bytes are buffered until a blank line completes an event, so events and
/// multi-byte characters split across network chunks decode correctly.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds raw bytes and returns the chunks of every completed event.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<Result<StreamChunk, AIError>> {
        self.buffer.extend_from_slice(bytes);
        let mut results = Vec::new();

        while let Some((end, separator_len)) = find_event_end(&self.buffer) {
            let raw: Vec<u8> = self.buffer.drain(..end + separator_len).collect();
            let event = String::from_utf8_lossy(&raw[..end]);
            if let Some(item) = parse_event(&event) {
                results.push(item);
            }
        }

        results
    }
}

/// Position and length of the first event separator (`\n\n` or `\r\n\r\n`).
fn find_event_end(buffer: &[u8]) -> Option<(usize, usize)> {
    let lf = buffer.windows(2).position(|w| w == b"\n\n").map(|i| (i, 2));
    let crlf = buffer.windows(4).position(|w| w == b"\r\n\r\n").map(|i| (i, 4));
    match (lf, crlf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

/// Parses one SSE event block.
///
/// ```text
/// event: content_block_delta
/// data: {"type":"content_block_delta","delta":{"text":"Hello"}}
/// ```
fn parse_event(block: &str) -> Option<Result<StreamChunk, AIError>> {
    let mut event = "";
    let mut data = String::new();

    for line in block.lines() {
        let line = line.trim_end_matches('\r');
        if let Some(name) = line.strip_prefix("event:") {
            event = name.trim();
        } else if let Some(payload) = line.strip_prefix("data:") {
            data.push_str(payload.trim_start());
        }
    }

    match event {
        "content_block_delta" => {
            let delta: ContentBlockDelta = serde_json::from_str(&data).ok()?;
            delta
                .delta
                .text
                .filter(|text| !text.is_empty())
                .map(|text| Ok(StreamChunk::content(text)))
        }
        "message_delta" => {
            let delta: MessageDelta = serde_json::from_str(&data).ok()?;
            let usage = delta
                .usage
                .map(|u| TokenUsage::new(u.input_tokens.unwrap_or(0), u.output_tokens))
                .unwrap_or_default();
            Some(Ok(StreamChunk::final_chunk(
                finish_reason(delta.delta.stop_reason.as_deref()),
                usage,
            )))
        }
        "error" => {
            let message = serde_json::from_str::<StreamError>(&data)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| "Stream error".to_string());
            Some(Err(AIError::unavailable(message)))
        }
        // message_start, content_block_start, ping, message_stop
        _ => None,
    }
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ContentBlockDelta {
    delta: TextDelta,
}

#[derive(Debug, Deserialize)]
struct TextDelta {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageDelta {
    delta: MessageDeltaContent,
    usage: Option<StreamUsage>,
}

#[derive(Debug, Deserialize)]
struct MessageDeltaContent {
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamUsage {
    input_tokens: Option<u32>,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    error: StreamErrorContent,
}

#[derive(Debug, Deserialize)]
struct StreamErrorContent {
    message: Option<String>,
}
