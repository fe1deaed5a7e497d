// Status bar component
//
// Renders key hints at the bottom: focused panel position, what the focused
// panel accepts, and the newest warning from the log buffer.

use crate::logging::{LogBuffer, LogLevel};
use crate::tui::traits::{Component, ComponentId, RenderContext};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const GLOBAL_HINT: &str = "Tab:next  q:quit";

pub struct StatusBar {
    log_buffer: LogBuffer,
    hint: Option<&'static str>,
    /// (focused, total), 1-based
    position: Option<(usize, usize)>,
}

impl StatusBar {
    pub fn new(log_buffer: LogBuffer) -> Self {
        Self {
            log_buffer,
            hint: None,
            position: None,
        }
    }

    /// Set what the focused panel reports; called once per frame
    pub fn update(&mut self, hint: Option<&'static str>, position: Option<(usize, usize)>) {
        self.hint = hint;
        self.position = position;
    }

    fn hints_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some((focused, total)) = self.position {
            parts.push(format!("[{}/{}]", focused, total));
        }
        if let Some(hint) = self.hint {
            parts.push(hint.to_string());
        }
        parts.push(GLOBAL_HINT.to_string());
        format!(" {}", parts.join(" │ "))
    }
}

#[cfg(test)]
impl StatusBar {
    pub fn hint(&self) -> Option<&'static str> {
        self.hint
    }

    pub fn position(&self) -> Option<(usize, usize)> {
        self.position
    }
}

impl Component for StatusBar {
    fn id(&self) -> ComponentId {
        ComponentId::StatusBar
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let mut spans = vec![Span::styled(
            self.hints_text(),
            Style::default().fg(theme.muted),
        )];

        if let Some(entry) = self.log_buffer.latest_at_least(LogLevel::Warn) {
            spans.push(Span::styled(
                format!(
                    " │ {} {} {}",
                    entry.timestamp.format("%H:%M:%S"),
                    entry.level.as_str(),
                    entry.message
                ),
                Style::default().fg(theme.warning),
            ));
        }

        let status = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.border)),
        );

        f.render_widget(status, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogEntry;
    use crate::tui::theme::Theme;
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(bar: &mut StatusBar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 2)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| {
                let ctx = RenderContext::new(&theme, ComponentId::CodePanel(0));
                bar.render(f, f.area(), &ctx);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, 1)].symbol())
            .collect()
    }

    #[test]
    fn test_hints_include_position_and_panel_hint() {
        let mut bar = StatusBar::new(LogBuffer::new());
        bar.update(Some("Enter:expand"), Some((2, 3)));

        let row = draw(&mut bar);
        assert!(row.contains("[2/3]"));
        assert!(row.contains("Enter:expand"));
        assert!(row.contains("q:quit"));
    }

    #[test]
    fn test_latest_warning_is_shown() {
        let buffer = LogBuffer::new();
        buffer.add(LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Warn,
            message: "Unknown highlight theme".to_string(),
        });
        buffer.add(LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Debug,
            message: "noise".to_string(),
        });
        let mut bar = StatusBar::new(buffer);

        let row = draw(&mut bar);
        assert!(row.contains("WARN Unknown highlight theme"));
        assert!(!row.contains("noise"));
    }
}
