//! Configuration validation logic
//!
//! Startup calls `Settings::validate` once and refuses to run on error, so a
//! missing DSN or port surfaces before any socket or connection is opened.

use crate::config::error::ConfigError;
use crate::config::settings::{DatabaseConfig, LoggerSettings, ServerConfig, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Valid file rotations
const VALID_ROTATIONS: &[&str] = &["never", "daily", "hourly"];

/// URL schemes accepted by the PostgreSQL driver
const VALID_DATABASE_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Host must not be empty
    /// - Port must be between 1 and 65535
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Server host is required.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must not be empty
    /// - URL must use a PostgreSQL scheme
    /// - Max and min connections must be greater than 0
    /// - Min connections must not exceed max connections
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Set database.url, USER_API_DATABASE__URL or DB_DSN.",
            ));
        }

        if !VALID_DATABASE_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        if self.file.enabled {
            let format = self.file.format.to_lowercase();
            if !VALID_LOG_FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::ValidationError {
                    field: "logger.file.format".to_string(),
                    message: format!(
                        "Invalid log format '{}'. Valid formats are: {}",
                        self.file.format,
                        VALID_LOG_FORMATS.join(", ")
                    ),
                });
            }

            let rotation = self.file.rotation.to_lowercase();
            if !VALID_ROTATIONS.contains(&rotation.as_str()) {
                return Err(ConfigError::ValidationError {
                    field: "logger.file.rotation".to_string(),
                    message: format!(
                        "Invalid rotation '{}'. Valid values are: {}",
                        self.file.rotation,
                        VALID_ROTATIONS.join(", ")
                    ),
                });
            }

            if self.file.file_name.trim().is_empty() {
                return Err(ConfigError::validation(
                    "logger.file.file_name",
                    "Log file name cannot be empty when file output is enabled.",
                ));
            }
        }

        Ok(())
    }
}

impl Settings {
    /// Validate every configuration section, stopping at the first error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
