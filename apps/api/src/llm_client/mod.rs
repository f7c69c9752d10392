//! LLM Client: the single point of entry for completion API calls.
//!
//! No other module may call the completion API directly. Callers build a
//! [`CompletionRequest`] and hand it to a [`CompletionClient`]; the HTTP
//! implementation is [`LlmClient`].
//!
//! Model parameters are fixed constants so every contract is generated the same way.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::LlmConfig;

/// The model used for all completion calls.
pub const MODEL: &str = "gpt-4";
pub const MAX_TOKENS: u32 = 2000;
pub const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("No API key configured (set OPENAI_API_KEY)")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A single chat-completion request: one system message, one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub model: &'static str,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    /// Builds a request with the fixed model parameters.
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

/// The completion boundary. Carried in `AppState` as `Arc<dyn CompletionClient>`
/// so handlers can be exercised without network access.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the trimmed text of the first completion choice.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the trimmed content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
///
/// Built once at startup from [`LlmConfig`]. A missing key is not a
/// construction error; every call fails with [`LlmError::MissingApiKey`] instead.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Makes one call to the completion API and returns the full response.
    /// No retries: the caller surfaces failures and the user re-invokes.
    pub async fn call(&self, request: &CompletionRequest) -> Result<ChatResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let body = ChatRequest {
            model: request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let chat: ChatResponse = serde_json::from_str(&text)?;

        if let Some(usage) = &chat.usage {
            debug!(
                "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat)
    }
}

#[async_trait]
impl CompletionClient for LlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let response = self.call(request).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `error.message` out of an API error body, falling back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}
