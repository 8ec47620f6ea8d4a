//! Configuration merger for CLI arguments and config files
//!
//! CLI flags sit on top of every file and environment layer.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, Settings};

/// Merges CLI argument overrides into file-based configuration.
///
/// The base configuration is loaded unvalidated; validation runs once on the
/// merged result so a CLI flag can repair a file value.
#[derive(Debug)]
pub struct ConfigurationMerger {
    base_config: Settings,
    environment: Environment,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings, environment: Environment) -> Self {
        Self {
            base_config,
            environment,
        }
    }

    /// Loads the base configuration the way the CLI asks for it.
    ///
    /// `--config` selects a single file and `--env` overrides the detected
    /// environment.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading fails
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(ref path) = cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        let environment = loader.environment();
        let base_config = loader.load_unvalidated()?;

        Ok(Self::new(base_config, environment))
    }

    /// Apply CLI overrides and validate the result.
    ///
    /// Precedence for the log level: `serve --log-level`, then
    /// `--verbose`/`--quiet`, then configuration.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;

        Ok(config)
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }
}
