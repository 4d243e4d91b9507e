//! Event dispatcher: fans a webhook batch out to the resolver.
//!
//! Each text event gets its own tokio task, so the model calls of different
//! events overlap instead of queueing.  Results are collected back in input
//! order: slot *i* of the output always describes event *i*.
//!
//! A panic inside one task is contained to that slot.  A message whose
//! resolution panicked still gets the catalog's fallback reply in its own
//! locale; a reply whose delivery panicked is reported, never re-sent.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::{JoinError, JoinHandle};

use crate::catalog::Catalog;
use crate::dispatch::events::WebhookEvent;
use crate::locale::Locale;
use crate::resolver::{InboundMessage, OutboundReply, ReplyResolver};
use crate::sender::MessageSender;

// ---------------------------------------------------------------------------
// DeliveryOutcome
// ---------------------------------------------------------------------------

/// What happened to one event of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    /// Not a text message; nothing sent.
    Skipped,
    /// Reply handed to the sender successfully.
    Sent { reply: OutboundReply },
    /// Reply produced but delivery failed.
    Failed { reply: OutboundReply, error: String },
}

// ---------------------------------------------------------------------------
// EventDispatcher
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct EventDispatcher {
    resolver: ReplyResolver,
}

impl EventDispatcher {
    pub fn new(resolver: ReplyResolver) -> Self {
        Self { resolver }
    }

    /// Resolve every text event concurrently.
    ///
    /// Returns one slot per input event; non-text events are `None`.
    pub async fn dispatch_all(&self, events: &[WebhookEvent]) -> Vec<Option<OutboundReply>> {
        let tasks: Vec<Option<(InboundMessage, JoinHandle<OutboundReply>)>> = events
            .iter()
            .map(|event| {
                event.as_inbound().map(|message| {
                    let resolver = self.resolver.clone();
                    let owned = message.clone();
                    let handle = tokio::spawn(async move { resolver.resolve(&owned).await });
                    (message, handle)
                })
            })
            .collect();

        log::info!(
            "dispatching {} of {} events",
            tasks.iter().flatten().count(),
            events.len()
        );

        let mut replies = Vec::with_capacity(tasks.len());
        for task in tasks {
            replies.push(match task {
                None => None,
                Some((message, handle)) => Some(match handle.await {
                    Ok(reply) => reply,
                    Err(err) => self.recover(&message, &err),
                }),
            });
        }
        replies
    }

    /// Resolve every text event concurrently and hand each reply to `sender`.
    ///
    /// Each event runs as its own task in two isolated steps: resolve, then
    /// deliver.  A panic while resolving is replaced by the fallback reply,
    /// which is then delivered once.  A panic while delivering is reported
    /// as [`DeliveryOutcome::Failed`] and never retried, since the reply
    /// token may already be spent.  Delivery errors are not retried either.
    pub async fn dispatch_and_send(
        &self,
        events: &[WebhookEvent],
        sender: Arc<dyn MessageSender>,
    ) -> Vec<DeliveryOutcome> {
        let tasks: Vec<Option<(InboundMessage, JoinHandle<DeliveryOutcome>)>> = events
            .iter()
            .map(|event| {
                event.as_inbound().map(|message| {
                    let resolver = self.resolver.clone();
                    let sender = Arc::clone(&sender);
                    let owned = message.clone();
                    let handle = tokio::spawn(resolve_and_deliver(resolver, sender, owned));
                    (message, handle)
                })
            })
            .collect();

        log::info!(
            "dispatching {} of {} events",
            tasks.iter().flatten().count(),
            events.len()
        );

        let mut outcomes = Vec::with_capacity(tasks.len());
        for task in tasks {
            outcomes.push(match task {
                None => DeliveryOutcome::Skipped,
                Some((message, handle)) => match handle.await {
                    Ok(outcome) => outcome,
                    // Cancelled by the runtime: delivery state unknown, nothing re-sent.
                    Err(err) => DeliveryOutcome::Failed {
                        reply: fallback_reply(self.resolver.catalog(), &message, &err),
                        error: DISPATCH_TASK_FAILED.into(),
                    },
                },
            });
        }
        outcomes
    }

    fn recover(&self, message: &InboundMessage, err: &JoinError) -> OutboundReply {
        fallback_reply(self.resolver.catalog(), message, err)
    }
}

/// Error reported for a reply whose delivery step panicked.
pub const DELIVERY_TASK_PANICKED: &str = "delivery task panicked";

const DISPATCH_TASK_FAILED: &str = "dispatch task failed";

/// Fallback reply for a message whose resolve task died.
fn fallback_reply(catalog: &Catalog, message: &InboundMessage, err: &JoinError) -> OutboundReply {
    log::error!("reply task failed, using fallback reply: {err}");
    let locale = Locale::detect(&message.text);
    OutboundReply {
        target_token: message.reply_token.clone(),
        text: catalog.fallback_reply(locale).to_string(),
    }
}

/// One event: resolve in a child task, then deliver in another.
async fn resolve_and_deliver(
    resolver: ReplyResolver,
    sender: Arc<dyn MessageSender>,
    message: InboundMessage,
) -> DeliveryOutcome {
    let resolve = {
        let resolver = resolver.clone();
        let message = message.clone();
        tokio::spawn(async move { resolver.resolve(&message).await })
    };
    let reply = match resolve.await {
        Ok(reply) => reply,
        Err(err) => fallback_reply(resolver.catalog(), &message, &err),
    };

    let delivery = {
        let reply = reply.clone();
        tokio::spawn(async move { deliver(sender.as_ref(), reply).await })
    };
    match delivery.await {
        Ok(outcome) => outcome,
        Err(err) => {
            log::error!("delivery task failed, not retrying: {err}");
            DeliveryOutcome::Failed {
                reply,
                error: DELIVERY_TASK_PANICKED.into(),
            }
        }
    }
}

async fn deliver(sender: &dyn MessageSender, reply: OutboundReply) -> DeliveryOutcome {
    match sender.send(&reply).await {
        Ok(()) => DeliveryOutcome::Sent { reply },
        Err(err) => {
            log::warn!("reply delivery failed: {err}");
            DeliveryOutcome::Failed {
                reply,
                error: err.to_string(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Category};
    use crate::classifier::{CompletionModel, CompletionRequest, FallbackClassifier, ModelError};
    use crate::dispatch::events::EventMessage;
    use crate::sender::SendError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Answers with a fixed label, but panics on a poisoned query.
    struct Model {
        answer: &'static str,
    }

    #[async_trait]
    impl CompletionModel for Model {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
            if request.prompt.contains("POISON") {
                panic!("model double exploded");
            }
            Ok(self.answer.to_string())
        }
    }

    /// Holds every call until three are in flight at once.
    struct Barrier {
        barrier: tokio::sync::Barrier,
    }

    #[async_trait]
    impl CompletionModel for Barrier {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, ModelError> {
            self.barrier.wait().await;
            Ok("Price".into())
        }
    }

    /// Records deliveries; rejects one token.
    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<OutboundReply>>,
    }

    #[async_trait]
    impl MessageSender for Recorder {
        async fn send(&self, reply: &OutboundReply) -> Result<(), SendError> {
            if reply.target_token == "expired" {
                return Err(SendError::Status {
                    status: 400,
                    body: "Invalid reply token".into(),
                });
            }
            self.sent.lock().unwrap().push(reply.clone());
            Ok(())
        }
    }

    /// Counts every send, then panics for the `"boom"` token.
    #[derive(Default)]
    struct Explodes {
        sends: AtomicUsize,
    }

    #[async_trait]
    impl MessageSender for Explodes {
        async fn send(&self, reply: &OutboundReply) -> Result<(), SendError> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            if reply.target_token == "boom" {
                panic!("sender double exploded");
            }
            Ok(())
        }
    }

    fn dispatcher(model: Arc<dyn CompletionModel>) -> EventDispatcher {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        let classifier =
            FallbackClassifier::new(model, Arc::clone(&catalog), 15, Duration::from_secs(5));
        EventDispatcher::new(ReplyResolver::classifying(catalog, classifier))
    }

    fn sticker(reply_token: &str) -> WebhookEvent {
        WebhookEvent {
            kind: "message".into(),
            reply_token: Some(reply_token.into()),
            message: Some(EventMessage {
                kind: "sticker".into(),
                ..EventMessage::default()
            }),
            ..WebhookEvent::default()
        }
    }

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    // -----------------------------------------------------------------------
    // dispatch_all
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn non_text_event_keeps_its_slot() {
        let d = dispatcher(Arc::new(Model { answer: "Payment" }));
        let events = vec![
            WebhookEvent::text("ร้านอยู่ที่ไหน", "t1", "U1"),
            sticker("t2"),
            WebhookEvent::text("how much does it cost?", "t3", "U3"),
        ];

        let replies = d.dispatch_all(&events).await;

        assert_eq!(replies.len(), 3);
        let first = replies[0].as_ref().expect("slot 1 resolved");
        assert_eq!(first.target_token, "t1");
        assert_eq!(first.text, catalog().reply(Category::Location, Locale::Thai));
        assert!(replies[1].is_none());
        let third = replies[2].as_ref().expect("slot 3 resolved");
        assert_eq!(third.target_token, "t3");
        assert_eq!(third.text, catalog().reply(Category::Price, Locale::Other));
    }

    #[tokio::test]
    async fn empty_batch_yields_empty_output() {
        let d = dispatcher(Arc::new(Model { answer: "Payment" }));
        assert!(d.dispatch_all(&[]).await.is_empty());
    }

    #[tokio::test]
    async fn classifier_calls_run_concurrently() {
        // Three unmatched messages; each model call blocks until all three
        // are in flight, so sequential processing would never finish.
        let model = Arc::new(Barrier {
            barrier: tokio::sync::Barrier::new(3),
        });
        let d = dispatcher(model);
        let events = vec![
            WebhookEvent::text("zzz one", "a", "U"),
            WebhookEvent::text("zzz two", "b", "U"),
            WebhookEvent::text("zzz three", "c", "U"),
        ];

        let replies = tokio::time::timeout(Duration::from_secs(5), d.dispatch_all(&events))
            .await
            .expect("dispatch must not serialise model calls");

        let tokens: Vec<_> = replies
            .iter()
            .map(|r| r.as_ref().unwrap().target_token.as_str())
            .collect();
        assert_eq!(tokens, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn panicking_task_gets_fallback_and_spares_siblings() {
        let d = dispatcher(Arc::new(Model { answer: "Payment" }));
        let events = vec![
            WebhookEvent::text("zzz POISON ข้อความ", "t1", "U1"),
            WebhookEvent::text("asdkfjasldkf random text", "t2", "U2"),
        ];

        let replies = d.dispatch_all(&events).await;

        let first = replies[0].as_ref().expect("fallback reply");
        assert_eq!(first.target_token, "t1");
        assert_eq!(first.text, catalog().fallback_reply(Locale::Thai));

        let second = replies[1].as_ref().expect("sibling resolved");
        assert_eq!(second.text, catalog().reply(Category::Payment, Locale::Other));
    }

    // -----------------------------------------------------------------------
    // dispatch_and_send
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn sends_each_reply_and_reports_per_slot() {
        let d = dispatcher(Arc::new(Model { answer: "Payment" }));
        let sender = Arc::new(Recorder::default());
        let events = vec![
            WebhookEvent::text("where is the shop", "t1", "U1"),
            sticker("t2"),
            WebhookEvent::text("where is the shop", "expired", "U3"),
        ];

        let outcomes = d.dispatch_and_send(&events, sender.clone()).await;

        assert!(matches!(&outcomes[0], DeliveryOutcome::Sent { reply } if reply.target_token == "t1"));
        assert_eq!(outcomes[1], DeliveryOutcome::Skipped);
        assert!(matches!(
            &outcomes[2],
            DeliveryOutcome::Failed { reply, error }
                if reply.target_token == "expired" && error.contains("400")
        ));

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].text, catalog().reply(Category::Location, Locale::Other));
    }

    #[tokio::test]
    async fn panicking_task_still_delivers_fallback() {
        let d = dispatcher(Arc::new(Model { answer: "Payment" }));
        let sender = Arc::new(Recorder::default());
        let events = vec![WebhookEvent::text("zzz POISON", "t1", "U1")];

        let outcomes = d.dispatch_and_send(&events, sender.clone()).await;

        let expected = OutboundReply {
            target_token: "t1".into(),
            text: catalog().fallback_reply(Locale::Other).to_string(),
        };
        assert_eq!(outcomes, vec![DeliveryOutcome::Sent { reply: expected.clone() }]);
        assert_eq!(*sender.sent.lock().unwrap(), vec![expected]);
    }

    #[tokio::test]
    async fn panicking_sender_is_not_retried_and_spares_siblings() {
        let d = dispatcher(Arc::new(Model { answer: "Payment" }));
        let sender = Arc::new(Explodes::default());
        let events = vec![
            WebhookEvent::text("where is the shop", "boom", "U1"),
            WebhookEvent::text("where is the shop", "ok", "U2"),
        ];

        let outcomes = tokio::spawn({
            let d = d.clone();
            let sender = sender.clone();
            async move { d.dispatch_and_send(&events, sender).await }
        })
        .await
        .expect("batch must survive a panicking sender");

        let location = catalog().reply(Category::Location, Locale::Other).to_string();
        assert_eq!(
            outcomes,
            vec![
                DeliveryOutcome::Failed {
                    reply: OutboundReply {
                        target_token: "boom".into(),
                        text: location.clone(),
                    },
                    error: DELIVERY_TASK_PANICKED.into(),
                },
                DeliveryOutcome::Sent {
                    reply: OutboundReply {
                        target_token: "ok".into(),
                        text: location,
                    },
                },
            ]
        );
        // One send per event: the panicked delivery is not repeated.
        assert_eq!(sender.sends.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn outcome_serialises_with_status_tag() {
        let json = serde_json::to_value(DeliveryOutcome::Skipped).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "skipped" }));
    }
}
