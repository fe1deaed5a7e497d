//! Scrollbar rendering helper
//!
//! Draws a vertical scrollbar for any `ScrollState`, only when content
//! overflows its viewport.

use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Render a vertical scrollbar on the right edge of `area`
///
/// No arrows: a code body is often only a few rows tall and every row
/// goes to the track.
pub fn render_scrollbar(f: &mut Frame, area: Rect, scroll: &ScrollState, thumb: Style) {
    if !scroll.needs_scrollbar() {
        return;
    }

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .thumb_style(thumb);

    // ScrollbarState wants: content_length (how much can scroll) and position
    let content_length = scroll.total().saturating_sub(scroll.viewport());
    let mut scrollbar_state = ScrollbarState::new(content_length).position(scroll.offset());

    f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn right_column(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| buffer[(buffer.area.width - 1, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_no_scrollbar_when_content_fits() {
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(3, 5);

        terminal
            .draw(|f| render_scrollbar(f, f.area(), &scroll, Style::default()))
            .unwrap();

        assert_eq!(right_column(&terminal).trim(), "");
    }

    #[test]
    fn test_scrollbar_drawn_on_overflow() {
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(50, 5);

        terminal
            .draw(|f| render_scrollbar(f, f.area(), &scroll, Style::default()))
            .unwrap();

        // Thumb sits at the top of the track, no arrow symbols
        let column = right_column(&terminal);
        assert!(column.starts_with('█'));
        assert!(!column.contains('↑'));
        assert!(!column.contains('↓'));
    }
}
