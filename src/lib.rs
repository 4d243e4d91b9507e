//! LINE chat auto-responder for a small Thai workshop.
//!
//! Inbound text messages are answered from a bilingual catalog of canned
//! replies.  A keyword matcher handles the common questions; anything it
//! misses goes to a language model, either to pick a category or to write
//! a free-form answer.

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod dispatch;
pub mod locale;
pub mod resolver;
pub mod sender;
