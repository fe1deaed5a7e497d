// CLI module - command-line argument parsing and handlers
//
// Normal use opens one code panel per input file. The `config` subcommand
// manages the configuration file:
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults
// - config --edit: Open config file in $EDITOR

use crate::config::{Config, PanelDefaults, VERSION};
use crate::tui::components::code_panel::PanelConfig;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

/// codepanel - collapsible, syntax-highlighted code panels in the terminal
#[derive(Parser, Debug)]
#[command(name = "codepanel")]
#[command(version = VERSION)]
#[command(about = "Collapsible, syntax-highlighted code panels in the terminal", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Files to show, one panel each ("-" reads stdin)
    pub files: Vec<PathBuf>,

    /// Panel title (single input only; otherwise the file name is used)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Language for highlighting and the badge (default: from file extension)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Start with panels expanded
    #[arg(short, long)]
    pub expanded: bool,

    /// Hide the line-number gutter
    #[arg(long)]
    pub no_line_numbers: bool,

    /// UI theme: dark, light
    #[arg(long)]
    pub theme: Option<String>,

    /// syntect theme for code tokens
    #[arg(long)]
    pub highlight_theme: Option<String>,

    /// Print available highlight themes and exit
    #[arg(long)]
    pub list_themes: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// One piece of input text and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    /// `None` for stdin
    pub path: Option<PathBuf>,
    pub code: String,
}

impl Cli {
    /// Apply flag overrides on top of the loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(highlight_theme) = &self.highlight_theme {
            config.highlight_theme = Some(highlight_theme.clone());
        }
        if self.expanded {
            config.panel.default_expanded = true;
        }
        if self.no_line_numbers {
            config.panel.show_line_numbers = false;
        }
    }

    /// Read every input named on the command line
    pub fn read_inputs(&self) -> Result<Vec<Input>> {
        if self.wants_stdin() && std::io::stdin().is_terminal() {
            bail!("No input: pass one or more files, or pipe code on stdin");
        }
        self.collect_inputs(read_stdin)
    }

    fn wants_stdin(&self) -> bool {
        self.files.is_empty() || self.files.iter().any(|p| p == Path::new("-"))
    }

    /// Stdin is drained at most once; every `-` gets a copy of that text
    fn collect_inputs(&self, read_stdin: impl FnOnce() -> Result<String>) -> Result<Vec<Input>> {
        let stdin = if self.wants_stdin() {
            Some(read_stdin()?)
        } else {
            None
        };

        if self.files.is_empty() {
            return Ok(stdin
                .map(|code| vec![Input { path: None, code }])
                .unwrap_or_default());
        }

        self.files
            .iter()
            .map(|path| match (&stdin, path == Path::new("-")) {
                (Some(code), true) => Ok(Input {
                    path: None,
                    code: code.clone(),
                }),
                _ => {
                    let code = std::fs::read_to_string(path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    Ok(Input {
                        path: Some(path.clone()),
                        code,
                    })
                }
            })
            .collect()
    }

    /// Build one panel configuration per input
    pub fn panel_configs(&self, inputs: Vec<Input>, defaults: &PanelDefaults) -> Vec<PanelConfig> {
        let single = inputs.len() == 1;

        inputs
            .into_iter()
            .map(|input| {
                let title = match (&self.title, &input.path) {
                    (Some(title), _) if single => title.clone(),
                    (_, Some(path)) => path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string()),
                    (_, None) => defaults.title.clone(),
                };
                let language = self
                    .language
                    .clone()
                    .or_else(|| input.path.as_deref().and_then(language_for_path))
                    .unwrap_or_else(|| defaults.language.clone());

                defaults.config_for(input.code).title(title).language(language)
            })
            .collect()
    }
}

fn read_stdin() -> Result<String> {
    let mut code = String::new();
    std::io::stdin()
        .read_to_string(&mut code)
        .context("Failed to read stdin")?;
    Ok(code)
}

/// Guess a language name from a file extension
pub fn language_for_path(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let name = match ext.as_str() {
        "rs" => "rust",
        "js" | "mjs" | "cjs" => "javascript",
        "ts" | "mts" | "cts" => "typescript",
        "py" => "python",
        "rb" => "ruby",
        "md" | "markdown" => "markdown",
        "sh" | "bash" | "zsh" => "bash",
        "yml" => "yaml",
        "h" => "c",
        "hpp" | "cc" | "cxx" => "cpp",
        other => other,
    };
    Some(name.to_string())
}

/// Handle subcommands. Returns true if a command was handled (exit after).
pub fn handle_command(cli: &Cli) -> Result<bool> {
    let Some(Commands::Config {
        show,
        reset,
        edit,
        path,
    }) = &cli.command
    else {
        return Ok(false);
    };

    if *path {
        handle_config_path()?;
    } else if *show {
        handle_config_show()?;
    } else if *reset {
        handle_config_reset()?;
    } else if *edit {
        handle_config_edit()?;
    } else {
        // No flag provided, show help
        println!("Usage: codepanel config [--show|--reset|--edit|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --path    Show config file path");
    }
    Ok(true)
}

fn config_path() -> Result<PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    let path = config_path()?;
    println!();
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating directory {}", parent.display()))?;
    }

    // Write the default config (using Config's single source of truth)
    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            // Platform-specific fallback
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", editor))?;
    if !status.success() {
        bail!("Editor exited with status: {}", status);
    }
    Ok(())
}
