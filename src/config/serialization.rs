//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Quote a string as a TOML basic string
fn quoted(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

impl Config {
    /// Render the full config as a commented TOML document
    pub fn to_toml(&self) -> String {
        let highlight_theme = match &self.highlight_theme {
            Some(name) => format!("highlight_theme = {}", quoted(name)),
            None => "# highlight_theme = \"base16-ocean.dark\"  # default follows the UI theme"
                .to_string(),
        };

        format!(
            r#"# codepanel configuration

# UI theme: dark, light
theme = {theme}

# syntect theme for code tokens (list with `codepanel --list-themes`)
{highlight_theme}

# Defaults for every panel
[panel]
title = {title}
language = {language}
default_expanded = {expanded}
show_line_numbers = {line_numbers}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# JSON file logging (in addition to the in-app buffer)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            theme = quoted(&self.theme),
            highlight_theme = highlight_theme,
            title = quoted(&self.panel.title),
            language = quoted(&self.panel.language),
            expanded = self.panel.default_expanded,
            line_numbers = self.panel.show_line_numbers,
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.to_string_lossy()),
            log_file_rotation = self.logging.file_rotation,
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}
