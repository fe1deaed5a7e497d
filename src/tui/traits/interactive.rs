//! Interactive trait for components that handle keyboard input
//!
//! Components that can receive and process keyboard events implement
//! this trait. The App routes input to the focused component.

use super::Component;
use crossterm::event::KeyEvent;

/// Result of handling a key event
///
/// Tells the App whether the component consumed the event or
/// if it should bubble up for global handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    /// Check if the event was handled
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Trait for components that handle keyboard input
///
/// # Event Flow
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// App (global handlers: q, Esc, Tab)
///    │
///    │ if not handled
///    ▼
/// Focused Component (via Interactive trait)
///    │
///    │ returns Handled::Yes or Handled::No
///    ▼
/// (dropped)
/// ```
pub trait Interactive: Component {
    /// Handle a key event
    ///
    /// Returns `Handled::Yes` if the component consumed the event,
    /// `Handled::No` if it should bubble up to the App.
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Hint text for status bar when this component is focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handled_from_bool() {
        assert_eq!(Handled::from(true), Handled::Yes);
        assert_eq!(Handled::from(false), Handled::No);
        assert!(Handled::Yes.was_handled());
        assert!(!Handled::No.was_handled());
    }
}
