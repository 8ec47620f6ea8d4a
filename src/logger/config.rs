//! Configuration types for the logger

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Level;

/// Main logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub console: ConsoleConfig,
    pub file: FileConfig,
    pub level: String,
}

impl LoggerConfig {
    pub fn validate(&self) -> Result<()> {
        self.level
            .parse::<Level>()
            .with_context(|| format!("Invalid log level: {}", self.level))?;

        self.file.validate().context("Invalid file configuration")?;

        if !self.console.enabled && !self.file.enabled {
            anyhow::bail!("At least one output (console or file) must be enabled");
        }

        Ok(())
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::new(true, true),
            file: FileConfig::default(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub colored: bool,
}

impl ConsoleConfig {
    pub fn new(enabled: bool, colored: bool) -> Self {
        Self { enabled, colored }
    }
}

/// File output configuration
#[derive(Debug, Clone)]
pub struct FileConfig {
    pub enabled: bool,
    pub directory: PathBuf,
    pub file_name: String,
    pub format: LogFormat,
    pub rotation: Rotation,
}

impl FileConfig {
    /// Pure check; the directory is created when the appender is built.
    pub fn validate(&self) -> Result<()> {
        if self.enabled {
            if self.directory.as_os_str().is_empty() {
                anyhow::bail!("Log directory cannot be empty when file output is enabled");
            }
            if self.file_name.trim().is_empty() {
                anyhow::bail!("Log file name cannot be empty when file output is enabled");
            }
        }
        Ok(())
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: PathBuf::from("logs"),
            file_name: "user-api.log".to_string(),
            format: LogFormat::Json,
            rotation: Rotation::Daily,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Full,
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => anyhow::bail!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            ),
        }
    }
}

/// How often the log file is rolled over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Never,
    Daily,
    Hourly,
}

impl std::str::FromStr for Rotation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "never" => Ok(Rotation::Never),
            "daily" => Ok(Rotation::Daily),
            "hourly" => Ok(Rotation::Hourly),
            _ => anyhow::bail!(
                "Invalid rotation '{}'. Valid values are: never, daily, hourly",
                s
            ),
        }
    }
}

impl From<Rotation> for tracing_appender::rolling::Rotation {
    fn from(rotation: Rotation) -> Self {
        match rotation {
            Rotation::Never => tracing_appender::rolling::Rotation::NEVER,
            Rotation::Daily => tracing_appender::rolling::Rotation::DAILY,
            Rotation::Hourly => tracing_appender::rolling::Rotation::HOURLY,
        }
    }
}
