//! Code panel component
//!
//! A collapsible panel showing one code snippet:
//! - Header: icon, title, language badge, chevron
//! - Body (expanded only): copy button and the highlighted code
//!
//! The panel owns exactly one piece of state, [`PanelState`]. Highlighting
//! and clipboard access are delegated to the collaborators passed in at
//! construction.

use super::scrollbar::render_scrollbar;
use crate::highlight::{HighlightOptions, Highlighter, RenderedBlock};
use crate::tui::clipboard::ClipboardWriter;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Copyable, Handled, Interactive, RenderContext, Scrollable,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::cell::OnceCell;
use std::rc::Rc;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const DEFAULT_TITLE: &str = "Example Code";
pub const DEFAULT_LANGUAGE: &str = "markdown";

const HEADER_ICON: &str = " 📝 ";
const COPY_LABEL: &str = " ⧉ Copy ";
const CHEVRON_COLLAPSED: &str = "▼";
const CHEVRON_EXPANDED: &str = "▲";

/// Rows used by chrome: top/bottom border + header
pub const COLLAPSED_HEIGHT: u16 = 3;
/// Extra rows when expanded: separator + copy toolbar
const BODY_CHROME_HEIGHT: u16 = 2;
/// Fewest rows that still show the copy button and one line of code
pub const MIN_EXPANDED_HEIGHT: u16 = COLLAPSED_HEIGHT + BODY_CHROME_HEIGHT + 1;

// ═══════════════════════════════════════════════════════════════════════════
// Configuration & State
// ═══════════════════════════════════════════════════════════════════════════

/// Construction parameters for a panel, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub title: String,
    pub language: String,
    pub code: String,
    pub default_expanded: bool,
    pub show_line_numbers: bool,
}

impl PanelConfig {
    /// Configuration with every optional parameter at its default
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            code: code.into(),
            default_expanded: false,
            show_line_numbers: true,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn default_expanded(mut self, expanded: bool) -> Self {
        self.default_expanded = expanded;
        self
    }

    pub fn show_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }
}

/// Body visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Collapsed,
    Expanded,
}

impl PanelState {
    pub fn initial(default_expanded: bool) -> Self {
        if default_expanded {
            Self::Expanded
        } else {
            Self::Collapsed
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }
}

/// Which part of the panel a screen position falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHit {
    Header,
    CopyButton,
    Body,
}

/// Screen areas recorded during the last render, for mouse routing
#[derive(Debug, Clone, Copy, Default)]
struct HitAreas {
    panel: Rect,
    header: Rect,
    copy_button: Option<Rect>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Panel
// ═══════════════════════════════════════════════════════════════════════════

pub struct CodePanel {
    config: PanelConfig,
    state: PanelState,
    /// Position in the App's panel stack (identity for focus)
    slot: usize,
    highlighter: Rc<dyn Highlighter>,
    clipboard: Rc<dyn ClipboardWriter>,
    /// Highlighted once on first use; config never changes afterwards
    rendered: OnceCell<RenderedBlock>,
    scroll: ScrollState,
    hit: HitAreas,
}

impl CodePanel {
    pub fn new(
        config: PanelConfig,
        highlighter: Rc<dyn Highlighter>,
        clipboard: Rc<dyn ClipboardWriter>,
    ) -> Self {
        let state = PanelState::initial(config.default_expanded);
        Self {
            config,
            state,
            slot: 0,
            highlighter,
            clipboard,
            rendered: OnceCell::new(),
            scroll: ScrollState::new(),
            hit: HitAreas::default(),
        }
    }

    /// Assign the stack position used as this panel's identity
    pub fn with_slot(mut self, slot: usize) -> Self {
        self.slot = slot;
        self
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state.is_expanded()
    }

    /// Flip between collapsed and expanded. Always succeeds.
    pub fn toggle(&mut self) {
        self.state = self.state.toggled();
        tracing::debug!(
            "Panel {:?} {}",
            self.config.title,
            if self.is_expanded() { "expanded" } else { "collapsed" }
        );
    }

    /// Chevron mirroring the current state
    pub fn chevron(&self) -> &'static str {
        match self.state {
            PanelState::Collapsed => CHEVRON_COLLAPSED,
            PanelState::Expanded => CHEVRON_EXPANDED,
        }
    }

    /// Send the code to the clipboard, if the copy action is available
    ///
    /// The write outcome is not reported back. Returns whether the action
    /// existed (it only does while expanded).
    pub fn copy(&self) -> bool {
        let Some(text) = self.copy_text() else {
            return false;
        };
        match self.clipboard.write(text) {
            Ok(()) => tracing::debug!("Copied {}", self.copy_description()),
            Err(e) => tracing::debug!("Copy of {} failed: {:#}", self.copy_description(), e),
        }
        true
    }

    /// Highlighted code, computed on first use
    pub fn rendered(&self) -> &RenderedBlock {
        self.rendered.get_or_init(|| {
            let options = HighlightOptions {
                show_line_numbers: self.config.show_line_numbers,
                ..HighlightOptions::default()
            };
            self.highlighter
                .render(&self.config.code, &self.config.language, &options)
        })
    }

    /// Rows this panel wants in its current state
    pub fn desired_height(&self) -> u16 {
        if !self.is_expanded() {
            return COLLAPSED_HEIGHT;
        }
        let code_rows = u16::try_from(self.rendered().len()).unwrap_or(u16::MAX);
        COLLAPSED_HEIGHT
            .saturating_add(BODY_CHROME_HEIGHT)
            .saturating_add(code_rows)
    }

    /// Forget where the panel was drawn; it takes no clicks until rendered again
    pub fn clear_hit_areas(&mut self) {
        self.hit = HitAreas::default();
    }

    /// Map a screen position from the last render onto a panel part
    pub fn hit_test(&self, column: u16, row: u16) -> Option<PanelHit> {
        let pos = Position::new(column, row);
        if !self.hit.panel.contains(pos) {
            return None;
        }
        if self.hit.copy_button.is_some_and(|r| r.contains(pos)) {
            return Some(PanelHit::CopyButton);
        }
        // Top border counts as header so clicks on the frame still toggle
        let header_band = Rect {
            y: self.hit.panel.y,
            height: self.hit.header.bottom().saturating_sub(self.hit.panel.y),
            ..self.hit.panel
        };
        if !self.is_expanded() || header_band.contains(pos) {
            return Some(PanelHit::Header);
        }
        Some(PanelHit::Body)
    }

    fn header_line(&self, ctx: &RenderContext, width: u16) -> Line<'static> {
        let theme = ctx.theme;
        let badge = format!(" {} ", self.config.language);
        let fixed = HEADER_ICON.width() + 2 + badge.width();
        let title = truncate_to_width(&self.config.title, (width as usize).saturating_sub(fixed));

        Line::from(vec![
            Span::raw(HEADER_ICON),
            Span::styled(
                title,
                Style::default()
                    .fg(theme.title)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(badge, Style::default().fg(theme.badge_fg).bg(theme.badge_bg)),
        ])
    }

    fn render_body(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let [separator, toolbar, code_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let rule = "─".repeat(separator.width as usize);
        f.render_widget(
            Paragraph::new(rule).style(Style::default().fg(theme.border)),
            separator,
        );

        let label_width = (COPY_LABEL.width() as u16).min(toolbar.width);
        let copy_button = Rect {
            x: toolbar.right().saturating_sub(label_width + 1),
            width: label_width,
            ..toolbar
        };
        f.render_widget(
            Paragraph::new("").style(Style::default().bg(theme.code_bg)),
            toolbar,
        );
        f.render_widget(
            Paragraph::new(COPY_LABEL).style(
                Style::default()
                    .fg(theme.copy_button_fg)
                    .bg(theme.copy_button_bg),
            ),
            copy_button,
        );
        self.hit.copy_button = Some(copy_button);

        let lines = self.rendered().lines().to_vec();
        self.scroll
            .update_dimensions(lines.len(), code_area.height as usize);
        let offset = u16::try_from(self.scroll.offset()).unwrap_or(u16::MAX);

        let code = Paragraph::new(lines)
            .style(Style::default().bg(theme.code_bg))
            .scroll((offset, 0));
        f.render_widget(code, code_area);

        render_scrollbar(f, code_area, &self.scroll, Style::default().fg(theme.muted));
    }
}

/// Cut `text` to at most `max` display columns, marking the cut with `…`
fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for CodePanel {
    fn id(&self) -> ComponentId {
        ComponentId::CodePanel(self.slot)
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let border_color = if ctx.is_focused(self.id()) {
            theme.border_focused
        } else {
            theme.border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        self.hit = HitAreas {
            panel: area,
            ..HitAreas::default()
        };
        if inner.height == 0 {
            return;
        }

        let [header, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
        let [title_area, chevron_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(3)]).areas(header);

        f.render_widget(
            Paragraph::new(self.header_line(ctx, title_area.width))
                .style(Style::default().bg(theme.header_bg)),
            title_area,
        );
        f.render_widget(
            Paragraph::new(self.chevron())
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.chevron).bg(theme.header_bg)),
            chevron_area,
        );
        self.hit.header = header;

        if self.is_expanded() && body.height > 0 {
            self.render_body(f, body, ctx);
        }
    }
}

impl Scrollable for CodePanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Copyable for CodePanel {
    fn copy_text(&self) -> Option<&str> {
        self.is_expanded().then_some(self.config.code.as_str())
    }

    fn copy_description(&self) -> String {
        format!("{:?} ({} bytes)", self.config.title, self.config.code.len())
    }
}

impl Interactive for CodePanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle();
                Handled::Yes
            }
            KeyCode::Char('c') | KeyCode::Char('y') => Handled::from(self.copy()),
            _ if !self.is_expanded() => Handled::No,
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_up();
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_down();
                Handled::Yes
            }
            KeyCode::Home => {
                self.scroll_to_top();
                Handled::Yes
            }
            KeyCode::End => {
                self.scroll_to_bottom();
                Handled::Yes
            }
            KeyCode::PageUp => {
                self.page_up();
                Handled::Yes
            }
            KeyCode::PageDown => {
                self.page_down();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        if self.is_expanded() {
            Some("Enter:collapse  c:copy  ↑↓:scroll")
        } else {
            Some("Enter:expand")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::SyntectHighlighter;
    use crate::tui::clipboard::testing::RecordingClipboard;
    use crate::tui::theme::Theme;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use std::cell::RefCell;

    /// Records what the panel passes through and renders plain lines
    #[derive(Default)]
    struct StubHighlighter {
        calls: RefCell<Vec<(String, String, bool)>>,
    }

    impl Highlighter for StubHighlighter {
        fn render(&self, code: &str, language: &str, options: &HighlightOptions) -> RenderedBlock {
            self.calls.borrow_mut().push((
                code.to_string(),
                language.to_string(),
                options.show_line_numbers,
            ));
            let plain = HighlightOptions {
                show_line_numbers: false,
                ..*options
            };
            SyntectHighlighter::default().render(code, "txt", &plain)
        }
    }

    fn panel_with(config: PanelConfig) -> (CodePanel, RecordingClipboard) {
        let clipboard = RecordingClipboard::default();
        let panel = CodePanel::new(
            config,
            Rc::new(SyntectHighlighter::default()),
            Rc::new(clipboard.clone()),
        );
        (panel, clipboard)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn draw(panel: &mut CodePanel, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| {
                let ctx = RenderContext::new(&theme, panel.id());
                panel.render(f, f.area(), &ctx);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn screen_contains(rows: &[String], needle: &str) -> bool {
        rows.iter().any(|row| row.contains(needle))
    }

    #[test]
    fn test_defaults() {
        let config = PanelConfig::new("x");
        assert_eq!(config.title, "Example Code");
        assert_eq!(config.language, "markdown");
        assert!(!config.default_expanded);
        assert!(config.show_line_numbers);
    }

    #[test]
    fn test_initial_state_follows_default_expanded() {
        let (collapsed, _) = panel_with(PanelConfig::new("x"));
        assert_eq!(collapsed.state(), PanelState::Collapsed);

        let (expanded, _) = panel_with(PanelConfig::new("x").default_expanded(true));
        assert_eq!(expanded.state(), PanelState::Expanded);
    }

    #[test]
    fn test_visibility_after_n_toggles_is_xor_of_parity() {
        for default_expanded in [false, true] {
            let (mut panel, _) =
                panel_with(PanelConfig::new("x").default_expanded(default_expanded));
            for n in 1..=7 {
                panel.toggle();
                assert_eq!(panel.is_expanded(), default_expanded ^ (n % 2 == 1));
            }
        }
    }

    #[test]
    fn test_chevron_mirrors_state() {
        let (mut panel, _) = panel_with(PanelConfig::new("x"));
        assert_eq!(panel.chevron(), "▼");
        panel.toggle();
        assert_eq!(panel.chevron(), "▲");
    }

    #[test]
    fn test_copy_is_unavailable_while_collapsed() {
        let (panel, clipboard) = panel_with(PanelConfig::new("secret"));
        assert!(!panel.copy());
        assert_eq!(clipboard.count(), 0);
    }

    #[test]
    fn test_copy_writes_code_verbatim() {
        let code = "  fn main() {\r\n\tprintln!(\"é\");\n}\n\n";
        let (panel, clipboard) = panel_with(PanelConfig::new(code).default_expanded(true));

        assert!(panel.copy());
        assert_eq!(clipboard.last().as_deref(), Some(code));
    }

    #[test]
    fn test_copy_failure_is_swallowed() {
        let clipboard = RecordingClipboard::failing();
        let panel = CodePanel::new(
            PanelConfig::new("x").default_expanded(true),
            Rc::new(SyntectHighlighter::default()),
            Rc::new(clipboard.clone()),
        );

        assert!(panel.copy());
        assert!(panel.is_expanded());
        assert_eq!(clipboard.count(), 1);
    }

    #[test]
    fn test_parameters_pass_through_to_highlighter() {
        let highlighter = Rc::new(StubHighlighter::default());
        let panel = CodePanel::new(
            PanelConfig::new("a\tb\n")
                .language("Weird-Lang")
                .show_line_numbers(false),
            highlighter.clone(),
            Rc::new(RecordingClipboard::default()),
        );

        panel.rendered();
        panel.rendered();

        let calls = highlighter.calls.borrow();
        assert_eq!(calls.len(), 1, "highlighting is cached");
        assert_eq!(
            calls[0],
            ("a\tb\n".to_string(), "Weird-Lang".to_string(), false)
        );
    }

    #[test]
    fn test_collapsed_render_shows_header_only() {
        let (mut panel, _) = panel_with(PanelConfig::new("console.log('hi')"));
        let rows = draw(&mut panel, 60, 10);

        assert!(screen_contains(&rows, "Example Code"));
        assert!(screen_contains(&rows, " markdown "));
        assert!(screen_contains(&rows, "▼"));
        assert!(!screen_contains(&rows, "Copy"));
        assert!(!screen_contains(&rows, "console.log"));
    }

    #[test]
    fn test_javascript_scenario() {
        let (mut panel, clipboard) =
            panel_with(PanelConfig::new("console.log('hi')").language("javascript"));

        let rows = draw(&mut panel, 60, 10);
        assert!(screen_contains(&rows, " javascript "));
        assert!(!screen_contains(&rows, "console.log"));

        assert_eq!(panel.handle_key(key(KeyCode::Enter)), Handled::Yes);
        let rows = draw(&mut panel, 60, 10);
        assert!(screen_contains(&rows, "console.log('hi')"));
        assert!(screen_contains(&rows, "Copy"));
        assert!(screen_contains(&rows, "▲"));

        assert_eq!(panel.handle_key(key(KeyCode::Char('c'))), Handled::Yes);
        assert_eq!(clipboard.last().as_deref(), Some("console.log('hi')"));

        panel.handle_key(key(KeyCode::Enter));
        assert_eq!(panel.state(), PanelState::Collapsed);
        let rows = draw(&mut panel, 60, 10);
        assert!(!screen_contains(&rows, "console.log"));
    }

    #[test]
    fn test_empty_code_scenario() {
        let (mut panel, clipboard) = panel_with(PanelConfig::new("").default_expanded(true));

        let rows = draw(&mut panel, 40, 8);
        assert!(screen_contains(&rows, "Copy"));
        assert_eq!(panel.rendered().len(), 1);
        assert_eq!(panel.desired_height(), 6);

        assert!(panel.copy());
        assert_eq!(clipboard.last().as_deref(), Some(""));
    }

    #[test]
    fn test_custom_title_rendered_verbatim() {
        let (mut panel, _) = panel_with(PanelConfig::new("x").title("Déjà vu: <setup>"));
        let rows = draw(&mut panel, 60, 3);
        assert!(screen_contains(&rows, "Déjà vu: <setup>"));
    }

    #[test]
    fn test_mouse_hit_areas() {
        let (mut panel, clipboard) = panel_with(PanelConfig::new("a\nb\nc"));
        draw(&mut panel, 40, 10);

        assert_eq!(panel.hit_test(5, 1), Some(PanelHit::Header));
        assert_eq!(panel.hit_test(5, 20), None);

        panel.toggle();
        draw(&mut panel, 40, 10);

        // Toolbar sits on row 3: border, header, separator, toolbar
        let copy_col = 40 - 1 - 2;
        assert_eq!(panel.hit_test(copy_col, 3), Some(PanelHit::CopyButton));
        assert_eq!(panel.hit_test(2, 5), Some(PanelHit::Body));
        assert_eq!(panel.hit_test(2, 1), Some(PanelHit::Header));
        assert_eq!(clipboard.count(), 0);
    }

    #[test]
    fn test_desired_height_tracks_state() {
        let (mut panel, _) = panel_with(PanelConfig::new("1\n2\n3\n4"));
        assert_eq!(panel.desired_height(), 3);
        panel.toggle();
        assert_eq!(panel.desired_height(), 3 + 2 + 4);
    }

    #[test]
    fn test_scroll_keys_ignored_while_collapsed() {
        let (mut panel, _) = panel_with(PanelConfig::new("x"));
        assert_eq!(panel.handle_key(key(KeyCode::Down)), Handled::No);
        assert_eq!(panel.handle_key(key(KeyCode::Char('c'))), Handled::No);
    }

    #[test]
    fn test_long_code_scrolls() {
        let code = (1..=50).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let (mut panel, _) = panel_with(PanelConfig::new(code).default_expanded(true));
        draw(&mut panel, 40, 10);

        panel.handle_key(key(KeyCode::PageDown));
        assert!(panel.scroll_offset() > 0);
        let rows = draw(&mut panel, 40, 10);
        assert!(!screen_contains(&rows, "line 1 "));

        panel.handle_key(key(KeyCode::Home));
        assert_eq!(panel.scroll_offset(), 0);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
