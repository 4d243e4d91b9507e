//! LINE webhook payload model.
//!
//! The body is assumed to be already signature-checked by the transport in
//! front of this crate.  Only the fields the bot needs are modelled; unknown
//! fields are ignored and unknown event or message types still parse, so a
//! new LINE event kind never breaks a whole batch.

use serde::{Deserialize, Serialize};

use crate::resolver::InboundMessage;

/// Top-level webhook body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookBody {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

impl WebhookBody {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// One webhook event (`message`, `follow`, `postback`, …).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub source: Option<EventSource>,
    #[serde(default)]
    pub message: Option<EventMessage>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub room_id: Option<String>,
}

impl EventSource {
    /// Conversation identifier: group, then room, then user.
    pub fn id(&self) -> Option<&str> {
        self.group_id
            .as_deref()
            .or(self.room_id.as_deref())
            .or(self.user_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl WebhookEvent {
    /// Build a text event.
    #[cfg(test)]
    pub(crate) fn text(text: &str, reply_token: &str, user_id: &str) -> Self {
        Self {
            kind: "message".into(),
            reply_token: Some(reply_token.into()),
            source: Some(EventSource {
                kind: "user".into(),
                user_id: Some(user_id.into()),
                ..EventSource::default()
            }),
            message: Some(EventMessage {
                kind: "text".into(),
                id: None,
                text: Some(text.into()),
            }),
            timestamp: None,
        }
    }

    /// The event as an [`InboundMessage`], if it is a text message with a
    /// reply token.  Everything else (stickers, images, follows, postbacks,
    /// redelivered events without a token) yields `None`.
    pub fn as_inbound(&self) -> Option<InboundMessage> {
        if self.kind != "message" {
            return None;
        }
        let message = self.message.as_ref().filter(|m| m.kind == "text")?;
        let text = message.text.as_ref()?;
        let reply_token = self.reply_token.as_ref().filter(|t| !t.is_empty())?;

        Some(InboundMessage {
            text: text.clone(),
            source_id: self
                .source
                .as_ref()
                .and_then(EventSource::id)
                .unwrap_or_default()
                .to_string(),
            reply_token: reply_token.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
