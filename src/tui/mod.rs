// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, mouse input, timer ticks)
// - Rendering the panel stack

pub mod app;
pub mod clipboard;
pub mod components;
pub mod scroll;
pub mod theme;
pub mod traits;
pub mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use traits::Handled;

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done. The terminal is restored even when the loop fails.
pub async fn run_tui(mut app: App) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    tracing::debug!("TUI started with {} panel(s)", app.panels.len());

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on terminal input and a redraw tick with tokio::select!, so the
/// status bar picks up new log entries even while no key is pressed.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        // Draw the UI
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        Ok(_) => {}
                        Err(e) => tracing::warn!("Failed to read terminal event: {}", e),
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {}
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Global → Focused panel
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Terminals that report releases would otherwise toggle twice
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if handle_global_keys(app, &key_event) {
        return;
    }

    app.dispatch_to_focused(key_event);
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.should_quit = true;
            true
        }
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            true
        }
        KeyCode::Tab => {
            if key_event.modifiers.contains(KeyModifiers::SHIFT) {
                app.focus_prev();
            } else {
                app.focus_next();
            }
            true
        }
        KeyCode::BackTab => {
            app.focus_prev();
            true
        }
        _ => false,
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    let (column, row) = (mouse_event.column, mouse_event.row);
    let handled = match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => app.handle_click(column, row),
        MouseEventKind::ScrollUp => app.handle_wheel(column, row, false),
        MouseEventKind::ScrollDown => app.handle_wheel(column, row, true),
        _ => Handled::No,
    };
    if !handled.was_handled() {
        tracing::trace!("Unhandled mouse event {:?}", mouse_event.kind);
    }
}
