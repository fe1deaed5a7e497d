// codepanel - collapsible, syntax-highlighted code panels in the terminal
//
// Each input (file or stdin) becomes one panel with a title, a language
// badge and a chevron. Expanding a panel shows its highlighted code and a
// copy button that puts the exact source text on the system clipboard.
//
// Architecture:
// - CLI (clap): Inputs, per-run overrides, `config` subcommand
// - Config: TOML file + env vars, merged over built-in defaults
// - Highlight (syntect): Code text to styled, optionally numbered lines
// - TUI (ratatui): Panel stack, focus, keyboard and mouse routing
// - Logging (tracing): In-memory buffer for the status bar, optional JSON files

mod cli;
mod config;
mod highlight;
mod logging;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::Config;
use highlight::{available_themes, SyntectHighlighter};
use logging::LogBuffer;
use std::rc::Rc;
use tui::app::App;
use tui::clipboard::SystemClipboard;
use tui::components::code_panel::CodePanel;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle CLI commands first (config --show, --reset, --edit, --path)
    // If a command was handled, exit early
    if cli::handle_command(&cli)? {
        return Ok(());
    }

    if cli.list_themes {
        for name in available_themes() {
            println!("{}", name);
        }
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::load()?;
    cli.apply_to(&mut config);

    // Read inputs before the TUI takes over the terminal
    let inputs = cli.read_inputs()?;

    // Logs go to the in-memory buffer while the TUI owns the screen.
    // The guard must be kept alive for the duration of the program so file logs flush.
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, log_buffer.clone());

    let theme = config.theme();
    let highlighter = Rc::new(SyntectHighlighter::new(&config.highlight_theme_name(&theme)));
    let clipboard = Rc::new(SystemClipboard);

    let panels: Vec<CodePanel> = cli
        .panel_configs(inputs, &config.panel)
        .into_iter()
        .enumerate()
        .map(|(slot, panel_config)| {
            CodePanel::new(panel_config, highlighter.clone(), clipboard.clone()).with_slot(slot)
        })
        .collect();

    tracing::info!(
        "codepanel {} starting: {} panel(s), theme {}",
        config::VERSION,
        panels.len(),
        theme.kind.name()
    );

    tui::run_tui(App::new(panels, theme, log_buffer)).await
}
