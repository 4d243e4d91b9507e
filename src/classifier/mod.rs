//! Model-backed fallback for messages no keyword rule matched.
//!
//! This module provides:
//! * [`CompletionModel`]: async trait for the generative-model collaborator.
//! * [`ChatCompletionsModel`]: OpenAI-compatible REST implementation.
//! * [`FallbackClassifier`]: picks a category; never fails.
//! * [`GenerativeResponder`]: writes a free-form answer (generate mode).
//! * [`prompt`]: prompt builders for both.

pub mod fallback;
pub mod generate;
pub mod model;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use fallback::{Classification, FallbackClassifier, Outcome};
pub use generate::GenerativeResponder;
pub use model::{ChatCompletionsModel, CompletionModel, CompletionRequest, ModelError};
