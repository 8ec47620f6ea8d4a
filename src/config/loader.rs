//! Configuration loader for user-api
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
pub const CONFIG_DIR_ENV: &str = "USER_API_CONFIG_DIR";

/// Environment variable for specific configuration file
pub const CONFIG_FILE_ENV: &str = "USER_API_CONFIG_FILE";

/// Legacy variable holding the database DSN
pub const LEGACY_DSN_ENV: &str = "DB_DSN";

/// Legacy variable holding the HTTP port
pub const LEGACY_PORT_ENV: &str = "SERVICE_PORT";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "USER_API";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. `default.toml` - Base default configuration (required)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local development overrides (optional)
/// 4. `USER_API_*` environment variables
/// 5. `DB_DSN` / `SERVICE_PORT` (highest priority)
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// Specific configuration file path (if set, skips layered loading)
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// This reads environment variables to determine:
    /// - Configuration directory (`USER_API_CONFIG_DIR`)
    /// - Specific configuration file (`USER_API_CONFIG_FILE`)
    /// - Application environment (`USER_API_APP_ENV`, then `ENV`)
    ///
    /// # Errors
    ///
    /// Returns an error if both `USER_API_CONFIG_DIR` and `USER_API_CONFIG_FILE`
    /// are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && config_dir_var.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "USER_API_CONFIG_DIR and USER_API_CONFIG_FILE cannot both be set. \
                 Use USER_API_CONFIG_DIR for layered configuration or \
                 USER_API_CONFIG_FILE for a single configuration file.",
            ));
        }

        let config_dir = config_dir_var
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));

        Ok(Self {
            config_dir,
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Load a single file instead of the layered directory.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Override the detected environment.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `default.toml` (or the single config file) is not found
    /// - Configuration parsing fails
    /// - Configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and deserialize configuration without validating it.
    ///
    /// CLI overrides are applied on top of this result before validation.
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            Self::add_file_source(builder, config_file, true)?
        } else {
            self.build_layered_config(builder)?
        };

        // FOO_SERVER__PORT -> server.port
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        let builder = Self::add_legacy_overrides(builder)?;

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, true)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
    }

    /// `DB_DSN` and `SERVICE_PORT` are the variable names older deployments use.
    fn add_legacy_overrides(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Ok(builder
            .set_override_option("database.url", non_empty(LEGACY_DSN_ENV))?
            .set_override_option("server.port", non_empty(LEGACY_PORT_ENV))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EnvGuard, lock_env};
    use std::fs;
    use tempfile::TempDir;

    const DEFAULT_CONFIG: &str = r#"
[application]
name = "test-app"
version = "1.0.0"

[server]
host = "127.0.0.1"
port = 3000

[database]
url = "postgres://localhost/test"
max_connections = 10
min_connections = 1
connection_timeout = 30

[logger]
level = "info"
"#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    fn clean_env(env: &mut EnvGuard) {
        for key in [
            CONFIG_DIR_ENV,
            CONFIG_FILE_ENV,
            AppEnvironment::ENV_VAR,
            AppEnvironment::LEGACY_ENV_VAR,
            LEGACY_DSN_ENV,
            LEGACY_PORT_ENV,
            "USER_API_SERVER__PORT",
            "USER_API_DATABASE__URL",
        ] {
            env.remove(key);
        }
    }

    #[test]
    fn test_config_loader_new_default() {
        let _lock = lock_env();
        let mut env = EnvGuard::new();
        clean_env(&mut env);

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_config_loader_mutual_exclusivity_error() {
        let _lock = lock_env();
        let mut env = EnvGuard::new();
        clean_env(&mut env);
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains(CONFIG_DIR_ENV));
                assert!(msg.contains(CONFIG_FILE_ENV));
            }
            other => panic!("Expected MutualExclusivityError, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_env_selects_environment() {
        let _lock = lock_env();
        let mut env = EnvGuard::new();
        clean_env(&mut env);
        env.set(AppEnvironment::LEGACY_ENV_VAR, "production");

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.environment(), AppEnvironment::Production);
    }

    #[test]
    fn test_load_missing_default_toml() {
        let _lock = lock_env();
        let mut env = EnvGuard::new();
        clean_env(&mut env);
        let temp_dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let loader = ConfigLoader::new().expect("Should create loader");
        match loader.load() {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_default_toml_only() {
        let _lock = lock_env();
        let mut env = EnvGuard::new();
        clean_env(&mut env);
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_CONFIG)]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");

        assert_eq!(settings.application.name, "test-app");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.database.url, "postgres://localhost/test");
    }

    #[test]
    fn test_environment_file_overrides_default() {
        let _lock = lock_env();
        let mut env = EnvGuard::new();
        clean_env(&mut env);
        let temp_dir = setup_config_dir(&[
            ("default.toml", DEFAULT_CONFIG),
            (
                "production.toml",
                "[server]\nport = 8080\n\n[database]\nmax_connections = 50\n",
            ),
            ("local.toml", "[server]\nhost = \"0.0.0.0\"\n"),
        ]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let settings = ConfigLoader::new()
            .unwrap()
            .with_environment(AppEnvironment::Production)
            .load()
            .expect("Should load settings");

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.database.max_connections, 50);
        assert_eq!(settings.database.min_connections, 1);
    }

    #[test]
    fn test_prefixed_env_overrides_file() {
        let _lock = lock_env();
        let mut env = EnvGuard::new();
        clean_env(&mut env);
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_CONFIG)]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set("USER_API_SERVER__PORT", "7070");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");
        assert_eq!(settings.server.port, 7070);
    }

    #[test]
    fn test_legacy_dsn_and_port_win() {
        let _lock = lock_env();
        let mut env = EnvGuard::new();
        clean_env(&mut env);
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_CONFIG)]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set("USER_API_SERVER__PORT", "7070");
        env.set(LEGACY_DSN_ENV, "postgres://legacy-host/users");
        env.set(LEGACY_PORT_ENV, "9191");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");
        assert_eq!(settings.database.url, "postgres://legacy-host/users");
        assert_eq!(settings.server.port, 9191);
    }

    #[test]
    fn test_single_file_mode() {
        let _lock = lock_env();
        let mut env = EnvGuard::new();
        clean_env(&mut env);
        let temp_dir = setup_config_dir(&[("custom.toml", DEFAULT_CONFIG)]);

        let settings = ConfigLoader::new()
            .unwrap()
            .with_config_file(temp_dir.path().join("custom.toml"))
            .load()
            .expect("Should load settings");
        assert_eq!(settings.application.name, "test-app");
    }

    #[test]
    fn test_missing_dsn_fails_validation() {
        let _lock = lock_env();
        let mut env = EnvGuard::new();
        clean_env(&mut env);
        let temp_dir = setup_config_dir(&[("default.toml", "[server]\nport = 3000\n")]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        match ConfigLoader::new().unwrap().load() {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "database.url"),
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }
}
