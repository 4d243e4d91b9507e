//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files.  Every section is
//! `#[serde(default)]`, so a settings file only needs the keys it changes.
//!
//! Secrets are normally not written to disk; [`AppConfig::apply_env`] fills
//! them in from the environment after loading.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// ModelConfig
// ---------------------------------------------------------------------------

/// Settings for the OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Base URL of the API endpoint (`/v1/chat/completions` is appended).
    pub base_url: String,
    /// API key: `None` for local providers that need no authentication.
    pub api_key: Option<String>,
    /// Model identifier sent to the API.
    pub model: String,
    /// Output-token cap for classification answers.  A category name is a
    /// single word, so this stays small.
    pub max_tokens: u32,
    /// Maximum seconds to wait for a model response.
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            api_key: None,
            model: "gpt-4o".into(),
            max_tokens: 15,
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// LineConfig
// ---------------------------------------------------------------------------

/// Settings for the LINE Messaging API reply endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// API host; `/v2/bot/message/reply` is appended.
    pub api_base: String,
    /// Channel access token used as the bearer credential.
    pub channel_access_token: Option<String>,
    /// Maximum seconds to wait for the reply API.
    pub timeout_secs: u64,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.line.me".into(),
            channel_access_token: None,
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// FallbackMode
// ---------------------------------------------------------------------------

/// What happens to a message no keyword rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackMode {
    /// Ask the model for a category and send that category's canned reply.
    #[default]
    Classify,
    /// Ask the model to write the answer itself, in the shop persona.
    Generate,
}

// ---------------------------------------------------------------------------
// GenerateConfig
// ---------------------------------------------------------------------------

/// Settings for [`FallbackMode::Generate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Persona instructions used for Thai messages.
    pub persona_thai: String,
    /// Persona instructions used for all other messages.
    pub persona_other: String,
    /// Sampling temperature for generated answers.
    pub temperature: f32,
    /// Output-token cap for generated answers.
    pub max_tokens: u32,
}

const PERSONA_THAI: &str = "\
คุณคือผู้ช่วยของร้าน TM การช่าง ร้านงานเหล็ก งานโลหะ และซ่อมรถ
ตอบลูกค้าด้วยภาษาสุภาพ เป็นกันเอง สั้น กระชับ ได้ใจความ
- เรื่องสั่งทำหรือราคา ให้ขอวัสดุ ขนาด และจำนวน แล้วแนะนำให้ติดต่อเจ้าของร้านที่ 0810891585
- เรื่องชำระเงิน ให้โอนเข้าบัญชี 'ทีเอ็มการช่าง' เท่านั้น พนักงานไม่รับเงินโดยตรง
- เรื่องซ่อมรถ ให้ติดต่อช่างตี๋ที่ 0818981016
- ถ้าไม่แน่ใจคำตอบ ให้แนะนำให้โทรหาเจ้าของร้านที่ 0810891585";

const PERSONA_OTHER: &str = "\
You are the assistant for TM การช่าง, a metal fabrication and car repair shop.
Reply politely and casually. Keep replies short and to the point.
- For orders or prices, ask for material, size and quantity, then suggest calling the owner at 0810891585.
- For payment, transfers go to the account 'ทีเอ็มการช่าง' only; staff never accept direct payments.
- For car repairs, refer the customer to Technician Tee at 0818981016.
- If unsure, suggest calling the owner at 0810891585.";

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            persona_thai: PERSONA_THAI.into(),
            persona_other: PERSONA_OTHER.into(),
            temperature: 0.7,
            max_tokens: 256,
        }
    }
}

// ---------------------------------------------------------------------------
// ResponderConfig
// ---------------------------------------------------------------------------

/// Settings for the reply pipeline itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ResponderConfig {
    /// Behaviour when no keyword rule matches.
    pub fallback_mode: FallbackMode,
    /// Catalog file replacing the built-in rules and replies.
    pub catalog_file: Option<PathBuf>,
    /// Generated-answer settings.
    pub generate: GenerateConfig,
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Generative model API.
    pub model: ModelConfig,
    /// LINE reply API.
    pub line: LineConfig,
    /// Reply pipeline.
    pub responder: ResponderConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from a path the user named explicitly.  Unlike
    /// [`load_from`](Self::load_from), a missing file is an error.
    pub fn load_existing(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("config file {} does not exist", path.display());
        }
        Self::load_from(path)
    }

    /// Write the default configuration to `path` unless a file is already
    /// there.  Returns `true` when a file was written.
    pub fn write_default(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        Self::default().save_to(path)?;
        Ok(true)
    }

    /// Save to an explicit path, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Override secrets and endpoints from the process environment.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `OPENAI_API_KEY` | `model.api_key` |
    /// | `OPENAI_BASE_URL` | `model.base_url` |
    /// | `OPENAI_MODEL` | `model.model` |
    /// | `LINE_CHANNEL_ACCESS_TOKEN` | `line.channel_access_token` |
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// [`apply_env`](Self::apply_env) with an injectable lookup.  Empty
    /// values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("OPENAI_API_KEY") {
            self.model.api_key = Some(key);
        }
        if let Some(url) = get("OPENAI_BASE_URL") {
            self.model.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = get("OPENAI_MODEL") {
            self.model.model = model;
        }
        if let Some(token) = get("LINE_CHANNEL_ACCESS_TOKEN") {
            self.line.channel_access_token = Some(token);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
