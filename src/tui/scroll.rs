// Scroll state for panel bodies
//
// Each component owns its scroll state - App just renders and routes input.
// Code bodies always open at the top; there is no streaming content to follow.

/// Scroll state for a single panel body
///
/// Owns all state needed for scrolling: position, content size, viewport size.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Current scroll offset (line index at top of viewport)
    offset: usize,

    /// Total number of lines in content
    total: usize,

    /// Number of lines visible in viewport
    viewport: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update content and viewport dimensions
    /// Call this each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Scroll up by one line
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// Scroll down by one line
    pub fn scroll_down(&mut self) {
        if self.offset < self.max_offset() {
            self.offset += 1;
        }
    }

    /// Scroll up by a page
    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
    }

    /// Scroll down by a page
    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
    }

    /// Jump to top
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Jump to bottom
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Get current scroll offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Check if content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    /// Maximum valid offset
    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    /// Get total content size
    pub fn total(&self) -> usize {
        self.total
    }

    /// Get viewport size
    pub fn viewport(&self) -> usize {
        self.viewport
    }
}
