//! Scrollable trait for components with scrollable content
//!
//! Components that display more content than fits in their viewport
//! implement this trait to get uniform scroll behavior.

use super::Component;
use crate::tui::scroll::ScrollState;

/// Trait for components with scrollable content
///
/// Components own their `ScrollState` and expose it through this trait.
/// Only `scroll_state()` and `scroll_state_mut()` need implementing; the
/// navigation methods delegate to `ScrollState`.
pub trait Scrollable: Component {
    /// Get immutable reference to scroll state
    fn scroll_state(&self) -> &ScrollState;

    /// Get mutable reference to scroll state
    fn scroll_state_mut(&mut self) -> &mut ScrollState;

    /// Scroll up by one line
    fn scroll_up(&mut self) {
        self.scroll_state_mut().scroll_up();
    }

    /// Scroll down by one line
    fn scroll_down(&mut self) {
        self.scroll_state_mut().scroll_down();
    }

    /// Jump to the top of content
    fn scroll_to_top(&mut self) {
        self.scroll_state_mut().scroll_to_top();
    }

    /// Jump to the bottom of content
    fn scroll_to_bottom(&mut self) {
        self.scroll_state_mut().scroll_to_bottom();
    }

    /// Scroll up by a page
    fn page_up(&mut self) {
        self.scroll_state_mut().page_up();
    }

    /// Scroll down by a page
    fn page_down(&mut self) {
        self.scroll_state_mut().page_down();
    }

    /// Get current scroll offset
    fn scroll_offset(&self) -> usize {
        self.scroll_state().offset()
    }
}
