//! Defaults applied to every panel the CLI opens

use crate::tui::components::code_panel::{PanelConfig, DEFAULT_LANGUAGE, DEFAULT_TITLE};
use serde::Deserialize;

/// Panel defaults from the `[panel]` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelDefaults {
    /// Title when no file name or --title applies
    pub title: String,
    /// Language when neither --language nor the file extension decides
    pub language: String,
    pub default_expanded: bool,
    pub show_line_numbers: bool,
}

impl Default for PanelDefaults {
    fn default() -> Self {
        let base = PanelConfig::new("");
        Self {
            title: DEFAULT_TITLE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            default_expanded: base.default_expanded,
            show_line_numbers: base.show_line_numbers,
        }
    }
}

/// Panel settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FilePanel {
    pub title: Option<String>,
    pub language: Option<String>,
    pub default_expanded: Option<bool>,
    pub show_line_numbers: Option<bool>,
}

impl PanelDefaults {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FilePanel>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            title: file.title.unwrap_or(defaults.title),
            language: file.language.unwrap_or(defaults.language),
            default_expanded: file.default_expanded.unwrap_or(defaults.default_expanded),
            show_line_numbers: file.show_line_numbers.unwrap_or(defaults.show_line_numbers),
        }
    }

    /// Panel configuration for `code` with these defaults applied
    pub fn config_for(&self, code: impl Into<String>) -> PanelConfig {
        PanelConfig::new(code)
            .title(self.title.clone())
            .language(self.language.clone())
            .default_expanded(self.default_expanded)
            .show_line_numbers(self.show_line_numbers)
    }
}
