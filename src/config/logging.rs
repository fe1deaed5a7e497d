//! `[logging]` section: filter level and the optional JSON log files

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// How often the JSON log file rolls over
///
/// Read case-insensitively from the config file. Anything other than
/// `hourly`, `daily` or `never` is a config error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// One file for the lifetime of the process
    Never,
}

impl LogRotation {
    /// Name as written back to the config file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

impl TryFrom<String> for LogRotation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "never" => Ok(Self::Never),
            _ => Err(format!(
                "unknown log rotation \"{}\", expected hourly, daily or never",
                value
            )),
        }
    }
}

impl fmt::Display for LogRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effective logging settings
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
    /// Also write JSON lines to `file_dir`; the status bar buffer is always on
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File names are `<prefix>.<date>` for rotating appenders
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::default(),
            file_prefix: "codepanel".to_string(),
        }
    }
}

/// `[logging]` as written in the file; every key optional
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<PathBuf>,
    pub file_rotation: Option<LogRotation>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Fill keys missing from the file section with defaults
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let Some(file) = file else {
            return Self::default();
        };
        let defaults = Self::default();

        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file.file_dir.unwrap_or(defaults.file_dir),
            file_rotation: file.file_rotation.unwrap_or(defaults.file_rotation),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
        }
    }
}
