//! Generated-answer responder.
//!
//! Instead of picking a canned reply, the model writes the answer in the
//! shop-assistant persona for the message's locale.  Failure yields `None`
//! and the caller sends the catalog's fallback reply instead.

use std::sync::Arc;
use std::time::Duration;

use crate::classifier::model::{CompletionModel, CompletionRequest};
use crate::classifier::prompt::answer_prompt;
use crate::config::GenerateConfig;
use crate::locale::Locale;

#[derive(Clone)]
pub struct GenerativeResponder {
    model: Arc<dyn CompletionModel>,
    config: GenerateConfig,
    timeout: Duration,
}

impl GenerativeResponder {
    pub fn new(model: Arc<dyn CompletionModel>, config: GenerateConfig, timeout: Duration) -> Self {
        Self {
            model,
            config,
            timeout,
        }
    }

    fn persona(&self, locale: Locale) -> &str {
        match locale {
            Locale::Thai => &self.config.persona_thai,
            Locale::Other => &self.config.persona_other,
        }
    }

    /// Ask the model for a reply to `text`; `None` on error, timeout or
    /// blank output.
    pub async fn answer(&self, text: &str, locale: Locale) -> Option<String> {
        let request = CompletionRequest {
            prompt: answer_prompt(self.persona(locale), text),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        match tokio::time::timeout(self.timeout, self.model.complete(&request)).await {
            Ok(Ok(answer)) if !answer.trim().is_empty() => Some(answer.trim().to_string()),
            Ok(Ok(_)) => {
                log::warn!("generated answer was blank");
                None
            }
            Ok(Err(err)) => {
                log::warn!("answer generation failed: {err}");
                None
            }
            Err(_elapsed) => {
                log::warn!("answer generation exceeded {:?}", self.timeout);
                None
            }
        }
    }
}
