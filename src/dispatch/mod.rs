//! Webhook intake and concurrent fan-out.
//!
//! This module provides:
//! * [`WebhookBody`] / [`WebhookEvent`]: the LINE webhook payload.
//! * [`EventDispatcher`]: resolves a batch concurrently, one slot per event.
//! * [`DeliveryOutcome`]: per-event result of [`EventDispatcher::dispatch_and_send`].

pub mod dispatcher;
pub mod events;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use dispatcher::{DeliveryOutcome, EventDispatcher};
pub use events::{EventMessage, EventSource, WebhookBody, WebhookEvent};
