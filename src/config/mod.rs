//! Configuration module for the LINE reply bot.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the model API,
//! the LINE API and the responder, `AppPaths` for the platform config
//! directory, and TOML persistence via `AppConfig::load` / `AppConfig::save_to`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, FallbackMode, GenerateConfig, LineConfig, ModelConfig, ResponderConfig};
