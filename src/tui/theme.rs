// Theme system for the TUI
//
// Provides color themes for the code panel chrome (header, badge, copy
// button, borders). Token colors inside the code block come from the
// syntect theme named by `highlight_theme`.

use ratatui::style::Color;
use ratatui::widgets::BorderType;
use serde::{Deserialize, Serialize};

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    /// Get all available themes
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light]
    }

    /// Parse a theme name from config or CLI (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
        }
    }

    /// Get the theme configuration
    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub kind: ThemeKind,

    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,
    pub border_type: BorderType,

    // Panel header
    pub header_bg: Color,
    pub title: Color,
    pub badge_fg: Color,
    pub badge_bg: Color,
    pub chevron: Color,

    // Panel body
    pub code_bg: Color,
    pub copy_button_fg: Color,
    pub copy_button_bg: Color,

    // Status line
    pub muted: Color,
    pub warning: Color,

    /// syntect theme used when config does not name one
    pub highlight_theme: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default), modelled on VS Code Dark+
    pub fn dark() -> Self {
        Self {
            kind: ThemeKind::Dark,

            background: Color::Reset,
            foreground: Color::White,
            border: Color::Gray,
            border_focused: Color::Cyan,
            border_type: BorderType::Rounded,

            header_bg: Color::Rgb(0x25, 0x2a, 0x3a),
            title: Color::Rgb(0xe5, 0xe7, 0xeb),
            badge_fg: Color::Rgb(0x4b, 0x55, 0x63),
            badge_bg: Color::Rgb(0xf9, 0xfa, 0xfb),
            chevron: Color::Gray,

            code_bg: Color::Rgb(0x1e, 0x1e, 0x1e),
            copy_button_fg: Color::White,
            copy_button_bg: Color::Rgb(0x1f, 0x29, 0x37),

            muted: Color::DarkGray,
            warning: Color::Yellow,

            highlight_theme: "base16-ocean.dark",
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            kind: ThemeKind::Light,

            background: Color::White,
            foreground: Color::Black,
            border: Color::Rgb(0xd1, 0xd5, 0xdb),
            border_focused: Color::Blue,
            border_type: BorderType::Rounded,

            header_bg: Color::Rgb(0xef, 0xf6, 0xff),
            title: Color::Rgb(0x1f, 0x29, 0x37),
            badge_fg: Color::Rgb(0x4b, 0x55, 0x63),
            badge_bg: Color::White,
            chevron: Color::Rgb(0x4b, 0x55, 0x63),

            code_bg: Color::Rgb(0xfa, 0xfa, 0xfa),
            copy_button_fg: Color::White,
            copy_button_bg: Color::Rgb(0x1f, 0x29, 0x37),

            muted: Color::DarkGray,
            warning: Color::Rgb(184, 134, 11), // Dark goldenrod

            highlight_theme: "InspiredGitHub",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name_is_case_insensitive() {
        assert_eq!(ThemeKind::from_name("Light"), Some(ThemeKind::Light));
        assert_eq!(ThemeKind::from_name(" dark "), Some(ThemeKind::Dark));
        assert_eq!(ThemeKind::from_name("dracula"), None);
    }

    #[test]
    fn test_every_kind_builds_matching_theme() {
        for kind in ThemeKind::all() {
            assert_eq!(kind.theme().kind, *kind);
        }
    }
}
