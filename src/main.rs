use clap::Parser;

use user_api::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Configuration problems stop the process before anything is opened
    let (settings, environment) = load_and_merge_config(&cli)
        .inspect_err(|e| eprintln!("Configuration error: {e:#}"))?;

    let _log_guard = init_logger_from_settings(&settings)
        .inspect_err(|e| eprintln!("Logger initialization error: {e:#}"))?;

    execute_command(&cli, settings, environment)
        .await
        .inspect_err(|e| tracing::error!(error = %format!("{e:#}"), "Command failed"))
}
