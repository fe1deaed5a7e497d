//! Copyable trait for components that provide clipboard content

use super::Component;

/// Trait for components that can provide content for the clipboard
///
/// When the user presses a copy keybind (`c` or `y`) or clicks a copy
/// button, the component's `Copyable` implementation determines what gets
/// copied.
pub trait Copyable: Component {
    /// Text for the clipboard, exactly as it should land there
    ///
    /// Returns `None` if the copy action is not currently available.
    fn copy_text(&self) -> Option<&str>;

    /// Short description of what will be copied (for log messages)
    fn copy_description(&self) -> String {
        format!("{:?}", self.id())
    }
}
