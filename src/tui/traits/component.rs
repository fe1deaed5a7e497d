//! Core component trait - the foundation of the UI system
//!
//! Every UI element that can be rendered implements `Component`.
//! This trait provides identity and rendering capability.

use crate::tui::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Unique identifier for a component
///
/// Used for focus tracking and event routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Code panel at the given position in the stack
    CodePanel(usize),
    /// Key hints and latest warning (non-focusable)
    StatusBar,
}

/// Immutable context passed to components during rendering
///
/// Components only see what they need - no access to mutable app state.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// Color theme for styling
    pub theme: &'a Theme,

    /// Which component currently has focus
    pub focus: ComponentId,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, focus: ComponentId) -> Self {
        Self { theme, focus }
    }

    /// Check if a component is currently focused
    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus == id
    }
}

/// Base trait for all UI components
///
/// A component is anything that can render itself to the terminal.
/// Rendering takes `&mut self` so components can record layout they need
/// later (hit areas for mouse clicks, viewport size for scrolling).
pub trait Component {
    /// Unique identifier for this component
    fn id(&self) -> ComponentId;

    /// Render the component to the given area
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_context_focus() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, ComponentId::CodePanel(1));
        assert!(ctx.is_focused(ComponentId::CodePanel(1)));
        assert!(!ctx.is_focused(ComponentId::CodePanel(0)));
    }
}
