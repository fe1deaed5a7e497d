//! Syntax highlighting for code panels
//!
//! Panels hand their code to a [`Highlighter`] and draw whatever lines come
//! back. The default implementation wraps `syntect`: grammars and themes are
//! loaded once per process, and a language that cannot be resolved renders
//! as plain text instead of failing.

mod aliases;

use aliases::language_aliases;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme as SyntectTheme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Gutter colour used when the caller does not override it
pub const LINE_NUMBER_COLOR: Color = Color::Rgb(0x6e, 0x76, 0x81);

/// Narrowest line-number gutter, in digits
const MIN_GUTTER_DIGITS: usize = 2;

/// Tabs are expanded for display only; copied text keeps the original tabs
const TAB_WIDTH: usize = 4;

/// Syntect theme used when a configured name is missing from the theme set
pub const FALLBACK_THEME: &str = "base16-ocean.dark";

/// Options passed through from the panel configuration
#[derive(Debug, Clone, Copy)]
pub struct HighlightOptions {
    pub show_line_numbers: bool,
    pub line_number_style: Style,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            line_number_style: Style::default().fg(LINE_NUMBER_COLOR),
        }
    }
}

/// Highlighted code ready to be drawn
///
/// With line numbers on, the first span of every line is the gutter.
#[derive(Debug, Clone, Default)]
pub struct RenderedBlock {
    lines: Vec<Line<'static>>,
}

impl RenderedBlock {
    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Tokenizes and styles code text
///
/// The panel treats this as an opaque rendering function: it passes `code`,
/// `language` and options through unchanged and draws the result.
pub trait Highlighter {
    fn render(&self, code: &str, language: &str, options: &HighlightOptions) -> RenderedBlock;
}

struct HighlightAssets {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

static HIGHLIGHT_ASSETS: OnceLock<HighlightAssets> = OnceLock::new();

fn highlight_assets() -> &'static HighlightAssets {
    HIGHLIGHT_ASSETS.get_or_init(|| {
        tracing::debug!("Loading syntect syntax and theme sets");
        HighlightAssets {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    })
}

/// Names of the syntect themes that can be used for `highlight_theme`
pub fn available_themes() -> Vec<String> {
    let mut names: Vec<String> = highlight_assets().theme_set.themes.keys().cloned().collect();
    names.sort();
    names
}

/// `syntect`-backed highlighter
///
/// The theme is resolved once at construction, so an unknown name warns
/// once no matter how many panels share the highlighter.
#[derive(Debug, Clone)]
pub struct SyntectHighlighter {
    theme: Option<&'static SyntectTheme>,
}

impl SyntectHighlighter {
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: resolve_theme(theme_name),
        }
    }
}

fn resolve_theme(name: &str) -> Option<&'static SyntectTheme> {
    let themes = &highlight_assets().theme_set.themes;
    themes
        .get(name)
        .or_else(|| {
            tracing::warn!("Unknown highlight theme {:?}, using {}", name, FALLBACK_THEME);
            themes.get(FALLBACK_THEME)
        })
        .or_else(|| themes.values().next())
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new(FALLBACK_THEME)
    }
}

impl Highlighter for SyntectHighlighter {
    fn render(&self, code: &str, language: &str, options: &HighlightOptions) -> RenderedBlock {
        let source_lines = split_code_lines(code);
        let assets = highlight_assets();
        let syntax = syntax_for_language(&assets.syntax_set, language);

        let bodies = self
            .theme
            .and_then(|theme| highlight_lines(&source_lines, syntax, theme, &assets.syntax_set))
            .unwrap_or_else(|| plain_lines(&source_lines));

        with_gutter(bodies, options)
    }
}

/// Split code into display lines
///
/// Empty code still yields one (empty) line so the block has a visible row.
fn split_code_lines(code: &str) -> Vec<&str> {
    if code.is_empty() {
        return vec![""];
    }
    code.lines().collect()
}

fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

fn plain_lines(lines: &[&str]) -> Vec<Vec<Span<'static>>> {
    lines
        .iter()
        .map(|line| vec![Span::raw(expand_tabs(line))])
        .collect()
}

fn highlight_lines(
    lines: &[&str],
    syntax: &SyntaxReference,
    theme: &SyntectTheme,
    syntax_set: &SyntaxSet,
) -> Option<Vec<Vec<Span<'static>>>> {
    // One highlighter for the whole block: parse state carries across lines
    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut rendered = Vec::with_capacity(lines.len());

    for line in lines {
        let line_with_newline = format!("{line}\n");
        let ranges = match highlighter.highlight_line(&line_with_newline, syntax_set) {
            Ok(ranges) => ranges,
            Err(e) => {
                tracing::debug!("Highlighting failed, rendering plain text: {}", e);
                return None;
            }
        };

        let spans: Vec<Span<'static>> = ranges
            .into_iter()
            .filter_map(|(style, text)| {
                let text = text.strip_suffix('\n').unwrap_or(text);
                if text.is_empty() {
                    return None;
                }
                Some(Span::styled(expand_tabs(text), convert_style(style)))
            })
            .collect();

        rendered.push(spans);
    }

    Some(rendered)
}

fn convert_style(style: syntect::highlighting::Style) -> Style {
    let fg = style.foreground;
    let mut out = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));
    if style.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}

fn with_gutter(bodies: Vec<Vec<Span<'static>>>, options: &HighlightOptions) -> RenderedBlock {
    if !options.show_line_numbers {
        return RenderedBlock {
            lines: bodies.into_iter().map(Line::from).collect(),
        };
    }

    // Right-aligned digits + one column of padding before the code
    let digits = bodies.len().to_string().len().max(MIN_GUTTER_DIGITS);

    let lines = bodies
        .into_iter()
        .enumerate()
        .map(|(i, body)| {
            let mut spans = Vec::with_capacity(body.len() + 1);
            spans.push(Span::styled(
                format!("{:>digits$} ", i + 1),
                options.line_number_style,
            ));
            spans.extend(body);
            Line::from(spans)
        })
        .collect();

    RenderedBlock { lines }
}

fn is_plain_text_syntax(syntax: &SyntaxReference) -> bool {
    syntax.name.eq_ignore_ascii_case("Plain Text")
}

fn syntax_for_language<'a>(syntax_set: &'a SyntaxSet, language: &str) -> &'a SyntaxReference {
    let aliases = language_aliases(language);
    if aliases.is_empty() {
        return syntax_set.find_syntax_plain_text();
    }

    let found = aliases
        .iter()
        .filter_map(|candidate| syntax_set.find_syntax_by_token(candidate))
        .find(|syntax| !is_plain_text_syntax(syntax))
        .or_else(|| {
            aliases
                .iter()
                .filter_map(|candidate| syntax_set.find_syntax_by_extension(candidate))
                .find(|syntax| !is_plain_text_syntax(syntax))
        })
        .or_else(|| {
            syntax_set.syntaxes().iter().find(|syntax| {
                !is_plain_text_syntax(syntax)
                    && aliases
                        .iter()
                        .any(|candidate| syntax.name.eq_ignore_ascii_case(candidate))
            })
        });

    match found {
        Some(syntax) => syntax,
        None => {
            tracing::debug!("No grammar for language {:?}, using plain text", language);
            syntax_set.find_syntax_plain_text()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distinct_colors(block: &RenderedBlock, gutter: bool) -> Vec<Color> {
        let skip = usize::from(gutter);
        let mut colors: Vec<Color> = Vec::new();
        for line in block.lines() {
            for span in line.spans.iter().skip(skip) {
                if let Some(fg) = span.style.fg {
                    if !colors.contains(&fg) {
                        colors.push(fg);
                    }
                }
            }
        }
        colors
    }

    /// Text of one rendered line, without the gutter span when there is one
    fn body_text(block: &RenderedBlock, index: usize, gutter: bool) -> String {
        block.lines()[index]
            .spans
            .iter()
            .skip(usize::from(gutter))
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn test_javascript_gets_token_colors() {
        let highlighter = SyntectHighlighter::default();
        let block = highlighter.render(
            "const x = 42; // answer",
            "javascript",
            &HighlightOptions::default(),
        );

        assert_eq!(block.len(), 1);
        assert!(distinct_colors(&block, true).len() > 1);
        assert_eq!(body_text(&block, 0, true), "const x = 42; // answer");
    }

    #[test]
    fn test_line_numbers_have_minimum_width() {
        let highlighter = SyntectHighlighter::default();
        let block = highlighter.render("a\nb\nc", "markdown", &HighlightOptions::default());

        assert_eq!(block.len(), 3);
        assert_eq!(block.lines()[0].spans[0].content, " 1 ");
        assert_eq!(block.lines()[2].spans[0].content, " 3 ");
        assert_eq!(
            block.lines()[0].spans[0].style.fg,
            Some(LINE_NUMBER_COLOR)
        );
    }

    #[test]
    fn test_gutter_grows_with_line_count() {
        let code = (1..=120).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let block = SyntectHighlighter::default().render(&code, "txt", &HighlightOptions::default());

        assert_eq!(block.len(), 120);
        assert_eq!(block.lines()[0].spans[0].content, "  1 ");
        assert_eq!(block.lines()[119].spans[0].content, "120 ");
    }

    #[test]
    fn test_line_numbers_can_be_hidden() {
        let options = HighlightOptions {
            show_line_numbers: false,
            ..HighlightOptions::default()
        };
        let block = SyntectHighlighter::default().render("fn main() {}", "rust", &options);

        assert!(block.lines()[0]
            .spans
            .iter()
            .all(|span| span.style.fg != Some(LINE_NUMBER_COLOR)));
        assert_eq!(body_text(&block, 0, false), "fn main() {}");
    }

    #[test]
    fn test_empty_code_renders_one_empty_line() {
        let block =
            SyntectHighlighter::default().render("", "markdown", &HighlightOptions::default());

        assert_eq!(block.len(), 1);
        assert_eq!(body_text(&block, 0, true), "");
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_text() {
        let block = SyntectHighlighter::default().render(
            "+[----->+++<]>+.",
            "brainfuck",
            &HighlightOptions::default(),
        );

        assert_eq!(block.len(), 1);
        assert_eq!(body_text(&block, 0, true), "+[----->+++<]>+.");
    }

    #[test]
    fn test_unknown_theme_still_highlights() {
        let block = SyntectHighlighter::new("no such theme").render(
            "let x = 1;",
            "rust",
            &HighlightOptions::default(),
        );

        assert!(!distinct_colors(&block, true).is_empty());
    }

    #[test]
    fn test_unknown_theme_warns_once_per_highlighter() {
        use crate::logging::{LogBuffer, LogLevel, TuiLogLayer};
        use tracing_subscriber::layer::SubscriberExt;

        let buffer = LogBuffer::new();
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let highlighter = SyntectHighlighter::new("dracula-ish");
            for _ in 0..3 {
                highlighter.render("x", "txt", &HighlightOptions::default());
            }
        });

        let warnings: Vec<String> = buffer
            .entries()
            .into_iter()
            .filter(|e| e.level == LogLevel::Warn)
            .map(|e| e.message)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("dracula-ish"));
    }

    #[test]
    fn test_tabs_expand_for_display() {
        let options = HighlightOptions {
            show_line_numbers: false,
            ..HighlightOptions::default()
        };
        let block = SyntectHighlighter::default().render("\tx", "txt", &options);

        assert_eq!(body_text(&block, 0, false), "    x");
    }

    #[test]
    fn test_alias_resolves_real_grammar() {
        let assets = highlight_assets();
        assert_ne!(syntax_for_language(&assets.syntax_set, "ts").name, "Plain Text");
        assert_ne!(syntax_for_language(&assets.syntax_set, "sh").name, "Plain Text");
        assert_eq!(
            syntax_for_language(&assets.syntax_set, "markdown").name,
            "Markdown"
        );
    }

    #[test]
    fn test_available_themes_include_fallback() {
        assert!(available_themes().iter().any(|t| t == FALLBACK_THEME));
    }
}
