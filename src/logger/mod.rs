//! Logger Module
//!
//! A logging system based on `tracing-subscriber` with support for:
//! - Console output with color control
//! - File output with multiple formats (Full, Compact, JSON)
//! - Time based file rotation through `tracing-appender`

pub mod config;
pub mod error;

pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

/// Initialize the global logger with the given configuration.
///
/// When file output is enabled the returned guard flushes the background
/// writer on drop, so the caller must hold it until shutdown.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<Option<WorkerGuard>> {
    config
        .validate()
        .map_err(|e| LoggerError::config(format!("{e:#}")))?;

    // RUST_LOG, when set, replaces the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = if config.file.enabled {
        let (writer, guard) = file_writer(&config.file)?;
        (Some(build_file_layer(&config.file, writer)), Some(guard))
    } else {
        (None, None)
    };

    let console_layer = config.console.enabled.then(|| {
        let use_ansi = config.console.colored && std::io::stdout().is_terminal();
        fmt::layer()
            .with_ansi(use_ansi)
            .with_target(true)
            .with_level(true)
    });

    // File layer goes first so console ANSI settings cannot leak into the file.
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(LoggerError::from)?;

    Ok(guard)
}

fn file_writer(config: &FileConfig) -> Result<(NonBlocking, WorkerGuard), LoggerError> {
    std::fs::create_dir_all(&config.directory)?;

    let appender = RollingFileAppender::builder()
        .rotation(config.rotation.into())
        .filename_prefix(config.file_name.as_str())
        .build(&config.directory)
        .map_err(|e| LoggerError::Appender {
            message: e.to_string(),
        })?;

    Ok(tracing_appender::non_blocking(appender))
}

fn build_file_layer<S>(config: &FileConfig, writer: NonBlocking) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer);

    match config.format {
        LogFormat::Full => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = FileConfig {
            enabled: true,
            directory: temp_dir.path().join("nested").join("logs"),
            rotation: Rotation::Never,
            ..Default::default()
        };

        let (_writer, _guard) = file_writer(&config).expect("writer should be created");
        assert!(config.directory.is_dir());
    }

    #[test]
    fn test_init_logger_rejects_invalid_config() {
        let config = LoggerConfig {
            level: "loud".to_string(),
            ..Default::default()
        };

        let err = init_logger(config).expect_err("invalid level must be rejected");
        assert!(err.to_string().contains("Invalid log level"));
    }
}
