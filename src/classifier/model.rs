//! Generative-model collaborator: the `CompletionModel` trait and the
//! `ChatCompletionsModel` HTTP implementation.
//!
//! `ChatCompletionsModel` calls any OpenAI-compatible `/v1/chat/completions`
//! endpoint (OpenAI, Groq, Ollama in OpenAI mode, LM Studio, vLLM, …).
//! All connection details come from [`ModelConfig`]; nothing is hardcoded.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ModelConfig;

// ---------------------------------------------------------------------------
// ModelError
// ---------------------------------------------------------------------------

/// Errors that can occur while talking to the model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("model request timed out")]
    Timeout,

    /// The endpoint answered with a non-success status.
    #[error("model endpoint returned HTTP {0}")]
    Status(u16),

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse model response: {0}")]
    Parse(String),

    /// The response carried no usable completion text.
    #[error("model returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for ModelError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ModelError::Timeout
        } else {
            ModelError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// CompletionRequest
// ---------------------------------------------------------------------------

/// A single-turn completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

// ---------------------------------------------------------------------------
// CompletionModel trait
// ---------------------------------------------------------------------------

/// Async trait for single-turn text completion.
///
/// Implementors must be `Send + Sync` so they can be shared across resolver
/// tasks as `Arc<dyn CompletionModel>`.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Return the trimmed completion text for `request`.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError>;
}

// ---------------------------------------------------------------------------
// ChatCompletionsModel
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/v1/chat/completions` endpoint with the prompt
/// as a single user message.
pub struct ChatCompletionsModel {
    client: reqwest::Client,
    config: ModelConfig,
}

impl ChatCompletionsModel {
    /// Build from config.  The HTTP client carries `config.timeout_secs` as
    /// its per-request timeout; a default client is used if the builder
    /// fails.
    pub fn from_config(config: &ModelConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionModel for ChatCompletionsModel {
    /// The `Authorization: Bearer …` header is attached only when
    /// `config.api_key` is a non-empty string.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
        let body = serde_json::json!({
            "model":       self.config.model,
            "messages": [
                { "role": "user", "content": request.prompt }
            ],
            "stream":      false,
            "temperature": request.temperature,
            "max_tokens":  request.max_tokens
        });

        let mut req = self.client.post(self.endpoint()).json(&body);

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ModelError::Status(status.as_u16()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ModelError::Parse(e.to_string()))?;

        let text = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(ModelError::EmptyResponse)?
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(ModelError::EmptyResponse);
        }

        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
