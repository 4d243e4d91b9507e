//! Reply resolver: turns one inbound text message into exactly one reply.
//!
//! # Resolution flow
//!
//! ```text
//! InboundMessage
//!   └─▶ Locale::detect                 (once; threaded through)
//!         └─▶ KeywordMatcher::find
//!               ├─ Some(category) → canned reply              [Keyword]
//!               └─ None
//!                    ├─ Classify mode → FallbackClassifier
//!                    │     ├─ known label   → canned reply    [Classifier]
//!                    │     └─ failure/other → fallback reply  [Fallback]
//!                    └─ Generate mode → GenerativeResponder
//!                          ├─ Some(text)    → generated text  [Generated]
//!                          └─ None          → fallback reply  [Fallback]
//! ```
//!
//! Every path ends in a non-empty [`OutboundReply`] addressed to the
//! message's reply token.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Category};
use crate::classifier::{
    CompletionModel, FallbackClassifier, GenerativeResponder, Outcome,
};
use crate::config::{AppConfig, FallbackMode};
use crate::locale::Locale;

// ---------------------------------------------------------------------------
// Message types
// ---------------------------------------------------------------------------

/// A text message received from the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub text: String,
    /// User, group or room the message came from.
    pub source_id: String,
    /// One-shot token for answering this message.
    pub reply_token: String,
}

/// A reply ready to hand to a [`MessageSender`](crate::sender::MessageSender).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundReply {
    pub target_token: String,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Which stage produced the reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Keyword,
    Classifier,
    Generated,
    Fallback,
}

/// A reply plus how it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub reply: OutboundReply,
    pub locale: Locale,
    /// `None` only for generated answers.
    pub category: Option<Category>,
    pub source: ReplySource,
}

// ---------------------------------------------------------------------------
// ReplyResolver
// ---------------------------------------------------------------------------

#[derive(Clone)]
enum Fallback {
    Classify(FallbackClassifier),
    Generate(GenerativeResponder),
}

/// Stateless reply pipeline over a shared, read-only [`Catalog`].
///
/// Cloning is cheap (`Arc` fields), so each dispatcher task owns its own
/// handle.
#[derive(Clone)]
pub struct ReplyResolver {
    catalog: Arc<Catalog>,
    fallback: Fallback,
}

impl ReplyResolver {
    /// Resolver that classifies unmatched messages.
    pub fn classifying(catalog: Arc<Catalog>, classifier: FallbackClassifier) -> Self {
        Self {
            catalog,
            fallback: Fallback::Classify(classifier),
        }
    }

    /// Resolver that answers unmatched messages with generated text.
    pub fn generating(catalog: Arc<Catalog>, responder: GenerativeResponder) -> Self {
        Self {
            catalog,
            fallback: Fallback::Generate(responder),
        }
    }

    /// Wire the resolver selected by `config.responder.fallback_mode`.
    pub fn from_config(
        catalog: Arc<Catalog>,
        model: Arc<dyn CompletionModel>,
        config: &AppConfig,
    ) -> Self {
        let timeout = Duration::from_secs(config.model.timeout_secs);
        match config.responder.fallback_mode {
            FallbackMode::Classify => {
                let classifier = FallbackClassifier::new(
                    model,
                    Arc::clone(&catalog),
                    config.model.max_tokens,
                    timeout,
                );
                Self::classifying(catalog, classifier)
            }
            FallbackMode::Generate => {
                let responder =
                    GenerativeResponder::new(model, config.responder.generate.clone(), timeout);
                Self::generating(catalog, responder)
            }
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve `message` to its reply.
    pub async fn resolve(&self, message: &InboundMessage) -> OutboundReply {
        self.resolve_detailed(message).await.reply
    }

    /// Resolve `message`, also reporting locale, category and source.
    pub async fn resolve_detailed(&self, message: &InboundMessage) -> Resolution {
        let locale = Locale::detect(&message.text);

        let (category, source, text) = match self.catalog.matcher().find(&message.text) {
            Some(category) => (
                Some(category),
                ReplySource::Keyword,
                self.catalog.reply(category, locale).to_string(),
            ),
            None => self.resolve_unmatched(&message.text, locale).await,
        };

        log::info!(
            "resolved reply: source={source:?} category={} locale={locale:?}",
            category.map_or("-", Category::label),
        );

        Resolution {
            reply: OutboundReply {
                target_token: message.reply_token.clone(),
                text,
            },
            locale,
            category,
            source,
        }
    }

    async fn resolve_unmatched(
        &self,
        text: &str,
        locale: Locale,
    ) -> (Option<Category>, ReplySource, String) {
        match &self.fallback {
            Fallback::Classify(classifier) => {
                let result = classifier.classify_detailed(text).await;
                let source = match result.outcome {
                    Outcome::Recognised => ReplySource::Classifier,
                    Outcome::Unrecognised(_) | Outcome::Failed(_) => ReplySource::Fallback,
                };
                (
                    Some(result.category),
                    source,
                    self.catalog.reply(result.category, locale).to_string(),
                )
            }
            Fallback::Generate(responder) => match responder.answer(text, locale).await {
                Some(answer) => (None, ReplySource::Generated, answer),
                None => (
                    Some(self.catalog.fallback()),
                    ReplySource::Fallback,
                    self.catalog.fallback_reply(locale).to_string(),
                ),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
