// UI rendering logic
//
// Called on every frame: the panel stack fills the screen above a
// two-line status bar.

use super::app::App;
use super::traits::{Component, RenderContext};
use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    // Apply theme background to entire frame
    let bg_block = Block::default().style(
        Style::default()
            .bg(app.theme.background)
            .fg(app.theme.foreground),
    );
    f.render_widget(bg_block, f.area());

    let [content, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(f.area());

    let placed = app.layout(content);
    app.update_status();

    let ctx = RenderContext::new(&app.theme, app.focus_id());
    for (index, area) in placed {
        app.panels[index].render(f, area, &ctx);
    }
    app.status_bar.render(f, status, &ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::SyntectHighlighter;
    use crate::logging::LogBuffer;
    use crate::tui::clipboard::testing::RecordingClipboard;
    use crate::tui::components::code_panel::{CodePanel, PanelConfig};
    use crate::tui::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};
    use std::rc::Rc;

    #[test]
    fn test_draw_shows_panels_and_status() {
        let highlighter = Rc::new(SyntectHighlighter::default());
        let panels = ["one.rs", "two.py"]
            .iter()
            .enumerate()
            .map(|(i, title)| {
                CodePanel::new(
                    PanelConfig::new("x = 1").title(*title),
                    highlighter.clone(),
                    Rc::new(RecordingClipboard::default()),
                )
                .with_slot(i)
            })
            .collect();
        let mut app = App::new(panels, Theme::default(), LogBuffer::new());

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = (0..buffer.area.height)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol().to_string())
            .collect();

        assert!(screen.contains("one.rs"));
        assert!(screen.contains("two.py"));
        assert!(screen.contains("[1/2]"));
    }
}
