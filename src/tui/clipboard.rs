//! Clipboard collaborator for copy actions
//!
//! Panels only see the [`ClipboardWriter`] trait. The real implementation
//! uses the `arboard` crate for cross-platform support (Windows, macOS, Linux).
//! The clipboard is created fresh each time to avoid holding resources.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Something that can receive text for the system clipboard
///
/// Implementations must write `text` verbatim. Callers are free to ignore
/// the returned outcome.
pub trait ClipboardWriter {
    fn write(&self, text: &str) -> Result<()>;
}

/// System clipboard backed by `arboard`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    /// Common failure cases: no display server (headless Linux), permission denied.
    fn write(&self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
        clipboard
            .set_text(text)
            .context("Failed to set clipboard text")?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::ClipboardWriter;
    use anyhow::{bail, Result};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every write so tests can assert on exact contents
    #[derive(Debug, Default, Clone)]
    pub struct RecordingClipboard {
        pub writes: Rc<RefCell<Vec<String>>>,
        pub fail: bool,
    }

    impl RecordingClipboard {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn last(&self) -> Option<String> {
            self.writes.borrow().last().cloned()
        }

        pub fn count(&self) -> usize {
            self.writes.borrow().len()
        }
    }

    impl ClipboardWriter for RecordingClipboard {
        fn write(&self, text: &str) -> Result<()> {
            self.writes.borrow_mut().push(text.to_string());
            if self.fail {
                bail!("clipboard unavailable");
            }
            Ok(())
        }
    }
}
