// TUI application state
//
// This module owns the stack of code panels, tracks which one has focus,
// and routes keyboard and mouse input to it. Panels keep their own
// expanded/collapsed state; App only decides where each one is drawn.

use super::components::code_panel::{
    CodePanel, PanelHit, COLLAPSED_HEIGHT, MIN_EXPANDED_HEIGHT,
};
use super::components::status_bar::StatusBar;
use super::theme::Theme;
use super::traits::{ComponentId, Handled, Interactive, Scrollable};
use crate::logging::LogBuffer;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

/// Main application state for the TUI
pub struct App {
    /// Panels, top to bottom
    pub panels: Vec<CodePanel>,

    /// Index of the focused panel
    pub focused: usize,

    /// First panel drawn; advances so the focused panel stays on screen
    first_visible: usize,

    /// Current color theme
    pub theme: Theme,

    /// Footer with key hints and the latest warning
    pub status_bar: StatusBar,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(panels: Vec<CodePanel>, theme: Theme, log_buffer: LogBuffer) -> Self {
        Self {
            panels,
            focused: 0,
            first_visible: 0,
            theme,
            status_bar: StatusBar::new(log_buffer),
            should_quit: false,
        }
    }

    /// Focus id handed to components while rendering
    pub fn focus_id(&self) -> ComponentId {
        ComponentId::CodePanel(self.focused)
    }

    pub fn focused_panel(&self) -> Option<&CodePanel> {
        self.panels.get(self.focused)
    }

    fn focused_panel_mut(&mut self) -> Option<&mut CodePanel> {
        self.panels.get_mut(self.focused)
    }

    /// Move focus to the next panel (wraps around)
    pub fn focus_next(&mut self) {
        if !self.panels.is_empty() {
            self.focused = (self.focused + 1) % self.panels.len();
        }
    }

    /// Move focus to the previous panel (wraps around)
    pub fn focus_prev(&mut self) {
        if !self.panels.is_empty() {
            self.focused = self
                .focused
                .checked_sub(1)
                .unwrap_or(self.panels.len() - 1);
        }
    }

    /// Route a key event to the focused panel
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match self.focused_panel_mut() {
            Some(panel) => panel.handle_key(key),
            None => Handled::No,
        }
    }

    /// Left click: focus the panel under the pointer and act on the part hit
    pub fn handle_click(&mut self, column: u16, row: u16) -> Handled {
        let Some((index, hit)) = self.hit_test(column, row) else {
            return Handled::No;
        };
        self.focused = index;

        let panel = &mut self.panels[index];
        match hit {
            PanelHit::Header => {
                panel.toggle();
                Handled::Yes
            }
            PanelHit::CopyButton => Handled::from(panel.copy()),
            PanelHit::Body => Handled::Yes,
        }
    }

    /// Mouse wheel: scroll the expanded panel under the pointer
    pub fn handle_wheel(&mut self, column: u16, row: u16, down: bool) -> Handled {
        let Some((index, _)) = self.hit_test(column, row) else {
            return Handled::No;
        };
        let panel = &mut self.panels[index];
        if !panel.is_expanded() {
            return Handled::No;
        }
        if down {
            panel.scroll_down();
        } else {
            panel.scroll_up();
        }
        Handled::Yes
    }

    fn hit_test(&self, column: u16, row: u16) -> Option<(usize, PanelHit)> {
        self.panels
            .iter()
            .enumerate()
            .find_map(|(i, panel)| panel.hit_test(column, row).map(|hit| (i, hit)))
    }

    /// Place the visible panels inside `area`, top to bottom
    ///
    /// Panels above `first_visible` and panels that do not fit are left out,
    /// and stop taking clicks until they are placed again.
    pub fn layout(&mut self, area: Rect) -> Vec<(usize, Rect)> {
        self.keep_focus_visible(area.height);
        for panel in &mut self.panels {
            panel.clear_hit_areas();
        }

        let desired: Vec<u16> = self.panels[self.first_visible..]
            .iter()
            .map(CodePanel::desired_height)
            .collect();

        let mut y = area.y;
        allocate_heights(&desired, area.height)
            .into_iter()
            .enumerate()
            .map(|(i, height)| {
                let rect = Rect {
                    y,
                    height,
                    ..area
                };
                y += height;
                (self.first_visible + i, rect)
            })
            .collect()
    }

    fn keep_focus_visible(&mut self, height: u16) {
        if self.focused < self.first_visible {
            self.first_visible = self.focused;
            return;
        }
        while self.first_visible < self.focused {
            let desired: Vec<u16> = self.panels[self.first_visible..=self.focused]
                .iter()
                .map(CodePanel::desired_height)
                .collect();
            if allocate_heights(&desired, height).len() == desired.len() {
                break;
            }
            self.first_visible += 1;
        }
    }

    /// Refresh the status bar from the focused panel
    pub fn update_status(&mut self) {
        let hint = self.focused_panel().and_then(Interactive::focus_hint);
        let position = (!self.panels.is_empty()).then(|| (self.focused + 1, self.panels.len()));
        self.status_bar.update(hint, position);
    }
}

/// Split `available` rows between panels wanting `desired` rows each
///
/// Every panel first gets its minimum, in order, until the space runs out:
/// a collapsed panel needs its header, an expanded one also needs the copy
/// button and a line of code. Panels that do not fit are dropped from the
/// result rather than squeezed. The remaining rows are shared evenly between
/// panels still wanting more, each capped at its desired height.
pub fn allocate_heights(desired: &[u16], available: u16) -> Vec<u16> {
    let mut heights = Vec::with_capacity(desired.len());
    let mut left = available;

    for &want in desired {
        let minimum = if want > COLLAPSED_HEIGHT {
            MIN_EXPANDED_HEIGHT
        } else {
            COLLAPSED_HEIGHT
        };
        let base = want.min(minimum);
        if base > left {
            break;
        }
        heights.push(base);
        left -= base;
    }

    loop {
        let hungry: Vec<usize> = (0..heights.len())
            .filter(|&i| heights[i] < desired[i])
            .collect();
        if hungry.is_empty() || left == 0 {
            break;
        }

        let share = (left / hungry.len() as u16).max(1);
        for i in hungry {
            if left == 0 {
                break;
            }
            let grant = share.min(desired[i] - heights[i]).min(left);
            heights[i] += grant;
            left -= grant;
        }
    }

    heights
}
