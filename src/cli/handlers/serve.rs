//! Serve command handler

use crate::config::{Environment, Settings};
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
    environment: Environment,
}

impl ServeCommandHandler {
    pub fn new(config: Settings, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    /// Run the server, or with `dry_run` only validate and report.
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config, self.environment).run().await
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;

        println!("Configuration is valid ({} environment)", self.environment);
        println!("Server would bind to: {}", self.config.server.address());
        println!(
            "Database pool: {}..{} connections, auto_migrate = {}",
            self.config.database.min_connections,
            self.config.database.max_connections,
            self.config.database.auto_migrate
        );
        println!("Log level: {}", self.config.logger.level);

        Ok(())
    }
}
