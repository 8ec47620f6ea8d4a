//! CLI module for user-api
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files)
//! - Command handlers for serve and migrate operations

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use tracing_appender::non_blocking::WorkerGuard;

use crate::config::Settings;
use crate::logger::init_logger;

/// Load configuration and apply CLI overrides.
///
/// Returns the validated settings together with the selected environment.
///
/// # Errors
/// Returns error if configuration loading, merging, or validation fails
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<(Settings, crate::config::Environment)> {
    let merger = ConfigurationMerger::from_cli(cli)?;
    let settings = merger.merge_cli_args(cli)?;
    Ok((settings, merger.environment()))
}

/// Install the global subscriber described by `settings.logger`.
///
/// The returned guard must outlive every log call that writes to the file.
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<Option<WorkerGuard>> {
    let logger_config = settings.logger.clone().into_logger_config()?;
    init_logger(logger_config)
}
