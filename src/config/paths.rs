//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout (config dir):
//!   Windows: %APPDATA%\line-reply-bot\
//!   macOS:   ~/Library/Application Support/line-reply-bot/
//!   Linux:   ~/.config/line-reply-bot/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and `catalog.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Full path to the optional `catalog.toml` override.
    pub catalog_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "line-reply-bot";

    /// Resolves all paths using the `dirs` crate, falling back to the current
    /// directory when the platform has no config directory.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        Self {
            settings_file: config_dir.join("settings.toml"),
            catalog_file: config_dir.join("catalog.toml"),
            config_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_live_under_config_dir() {
        let paths = AppPaths::new();
        assert!(paths.config_dir.ends_with("line-reply-bot"));
        assert!(paths.settings_file.starts_with(&paths.config_dir));
        assert!(paths
            .settings_file
            .file_name()
            .is_some_and(|n| n == "settings.toml"));
        assert!(paths
            .catalog_file
            .file_name()
            .is_some_and(|n| n == "catalog.toml"));
    }
}
