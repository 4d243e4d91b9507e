//! Application entry point: LINE reply bot.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] (explicit `--config` path, which must exist, or the
//!    platform default), then overlay secrets from the environment.
//!    `--init-config` instead writes a default settings file and exits.
//! 3. Load the [`Catalog`]: `--catalog`, then `responder.catalog_file`, then
//!    `catalog.toml` in the config directory, then the built-in catalog.
//! 4. Build the model client, the [`ReplyResolver`] and the
//!    [`EventDispatcher`].
//! 5. Read one webhook body from `FILE` (or stdin), dispatch it, deliver the
//!    replies and print the per-event outcomes as JSON on stdout.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use line_reply_bot::{
    catalog::Catalog,
    classifier::{ChatCompletionsModel, CompletionModel},
    config::{AppConfig, AppPaths},
    dispatch::{EventDispatcher, WebhookBody},
    resolver::ReplyResolver,
    sender::{LineSender, LogSender, MessageSender},
};

/// Answer a LINE webhook body from the reply catalog.
#[derive(Parser)]
#[command(name = "line-reply-bot", version, about)]
struct Cli {
    /// Settings file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog file overriding the configured or built-in one.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Log replies instead of posting them to LINE.
    #[arg(long)]
    dry_run: bool,

    /// Write a default settings file (to `--config` or the platform
    /// default) if none exists, then exit.
    #[arg(long)]
    init_config: bool,

    /// Webhook body to process; reads stdin when omitted.
    file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Startup helpers
// ---------------------------------------------------------------------------

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut config = match path {
        Some(path) => AppConfig::load_existing(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config ({e}); using defaults");
            AppConfig::default()
        }),
    };
    config.apply_env();
    Ok(config)
}

fn init_config(path: Option<&Path>) -> anyhow::Result<()> {
    let path = path.map_or_else(|| AppPaths::new().settings_file, Path::to_path_buf);
    if AppConfig::write_default(&path)
        .with_context(|| format!("failed to write config {}", path.display()))?
    {
        log::info!("Default config written to {}", path.display());
    } else {
        log::info!("Config already exists at {}; left unchanged", path.display());
    }
    Ok(())
}

fn load_catalog(cli_path: Option<&Path>, config: &AppConfig) -> anyhow::Result<Catalog> {
    let default_file = AppPaths::new().catalog_file;
    let path = cli_path
        .map(Path::to_path_buf)
        .or_else(|| config.responder.catalog_file.clone())
        .or_else(|| default_file.exists().then_some(default_file));

    match path {
        Some(path) => {
            let catalog = Catalog::load_from(&path)
                .with_context(|| format!("failed to load catalog {}", path.display()))?;
            log::info!("Catalog loaded: {}", path.display());
            Ok(catalog)
        }
        None => {
            log::info!("Using built-in catalog");
            Catalog::builtin().context("built-in catalog is invalid")
        }
    }
}

fn read_body(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read webhook body from stdin")?;
            Ok(raw)
        }
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.init_config {
        return init_config(cli.config.as_deref());
    }

    // 2. Configuration
    let config = load_config(cli.config.as_deref())?;
    log::info!(
        "LINE reply bot starting (model={}, fallback={:?})",
        config.model.model,
        config.responder.fallback_mode
    );

    // 3. Catalog
    let catalog = Arc::new(load_catalog(cli.catalog.as_deref(), &config)?);

    // 4. Resolver + dispatcher
    let model: Arc<dyn CompletionModel> = Arc::new(ChatCompletionsModel::from_config(&config.model));
    let dispatcher = EventDispatcher::new(ReplyResolver::from_config(catalog, model, &config));

    let sender: Arc<dyn MessageSender> = if cli.dry_run {
        Arc::new(LogSender)
    } else {
        Arc::new(LineSender::from_config(&config.line))
    };

    // 5. Process one webhook body
    let raw = read_body(cli.file.as_deref())?;
    let body = WebhookBody::from_json(&raw).context("malformed webhook body")?;

    let outcomes = dispatcher.dispatch_and_send(&body.events, sender).await;
    println!("{}", serde_json::to_string_pretty(&outcomes)?);
    Ok(())
}
