//! Outbound delivery collaborator.
//!
//! * [`MessageSender`]: async trait the dispatcher hands replies to.
//! * [`LineSender`]: LINE Messaging API `reply` endpoint.
//! * [`LogSender`]: dry-run sender that only logs.
//!
//! Delivery is attempted once; retry policy, if any, belongs to the caller.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::LineConfig;
use crate::resolver::OutboundReply;

// ---------------------------------------------------------------------------
// SendError
// ---------------------------------------------------------------------------

/// Errors that can occur while delivering a reply.
#[derive(Debug, Error)]
pub enum SendError {
    /// No channel access token configured.
    #[error("LINE channel access token is not configured")]
    MissingToken,

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The API rejected the reply.
    #[error("LINE API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl From<reqwest::Error> for SendError {
    fn from(e: reqwest::Error) -> Self {
        SendError::Request(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// MessageSender trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, reply: &OutboundReply) -> Result<(), SendError>;
}

// ---------------------------------------------------------------------------
// LineSender
// ---------------------------------------------------------------------------

/// Posts replies to `{api_base}/v2/bot/message/reply`.
pub struct LineSender {
    client: reqwest::Client,
    config: LineConfig,
}

impl LineSender {
    pub fn from_config(config: &LineConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl MessageSender for LineSender {
    async fn send(&self, reply: &OutboundReply) -> Result<(), SendError> {
        let token = self
            .config
            .channel_access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(SendError::MissingToken)?;

        let url = format!(
            "{}/v2/bot/message/reply",
            self.config.api_base.trim_end_matches('/')
        );
        let body = serde_json::json!({
            "replyToken": reply.target_token,
            "messages": [ { "type": "text", "text": reply.text } ]
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        log::debug!("reply delivered (len={})", reply.text.len());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LogSender
// ---------------------------------------------------------------------------

/// Logs replies instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSender;

#[async_trait]
impl MessageSender for LogSender {
    async fn send(&self, reply: &OutboundReply) -> Result<(), SendError> {
        log::info!(
            "[dry-run] reply to {} (len={})",
            reply.target_token,
            reply.text.len()
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
