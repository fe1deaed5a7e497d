//! Configuration for codepanel
//!
//! Configuration is loaded in order of precedence:
//! 1. Command-line flags (applied by the caller)
//! 2. Environment variables
//! 3. Config file (~/.config/codepanel/config.toml)
//! 4. Built-in defaults (lowest priority)

use crate::tui::theme::{Theme, ThemeKind};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod panel;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use logging::{FileLogging, LogRotation, LoggingConfig};
pub use panel::{FilePanel, PanelDefaults};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// UI theme name: "dark", "light"
    pub theme: String,

    /// syntect theme for code tokens; `None` uses the UI theme's pairing
    pub highlight_theme: Option<String>,

    /// Defaults for every panel opened
    pub panel: PanelDefaults,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeKind::default().name().to_string(),
            highlight_theme: None,
            panel: PanelDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,
    pub highlight_theme: Option<String>,

    /// Optional [panel] section
    pub panel: Option<FilePanel>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/codepanel/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("codepanel").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Silently skip - config is optional
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Parse a config file's contents
    ///
    /// A config that exists but is broken fails loudly rather than silently
    /// falling back to defaults while the user debugs the wrong thing.
    pub(crate) fn parse_file(contents: &str, path: &Path) -> Result<FileConfig> {
        toml::from_str(contents).map_err(|e| {
            anyhow!(
                "Failed to parse configuration file {}\n\n{}\n\
                 Tip: check for missing quotes around strings, invalid booleans \
                 (use true/false) and typos in section names.\n\
                 To reset, run `codepanel config --reset`.",
                path.display(),
                e
            )
        })
    }

    /// Load file config if it exists
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_file(&contents, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Cannot read configuration file {}", path.display())),
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn load() -> Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merge file values and environment lookups over the defaults
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Theme: env > file > default
        let theme = env("CODEPANEL_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        // Highlight theme: env > file > UI theme pairing
        let highlight_theme = env("CODEPANEL_HIGHLIGHT_THEME").or(file.highlight_theme);

        Self {
            theme,
            highlight_theme,
            panel: PanelDefaults::from_file(file.panel),
            logging: LoggingConfig::from_file(file.logging),
        }
    }

    /// Resolve the UI theme, falling back to the default for unknown names
    pub fn theme(&self) -> Theme {
        match ThemeKind::from_name(&self.theme) {
            Some(kind) => kind.theme(),
            None => {
                tracing::warn!("Unknown theme {:?}, using {}", self.theme, ThemeKind::default().name());
                Theme::default()
            }
        }
    }

    /// syntect theme name to highlight with
    pub fn highlight_theme_name(&self, theme: &Theme) -> String {
        self.highlight_theme
            .clone()
            .unwrap_or_else(|| theme.highlight_theme.to_string())
    }
}
