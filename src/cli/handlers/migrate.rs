//! Migrate command handler
//!
//! Applies, previews or rolls back the embedded schema migrations.

use crate::config::Settings;
use crate::db::{pending_migration_count, revert_migrations, run_pending_migrations};
use crate::error::AppResult;

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command
    ///
    /// `dry_run` only reports pending migrations; `rollback` reverts that
    /// many of the most recent ones. With neither, every pending migration
    /// is applied.
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Database connection or migration errors
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;

        let url = &self.config.database.url;

        if dry_run {
            let pending = pending_migration_count(url).await?;
            if pending == 0 {
                println!("No pending migrations - database is up to date");
            } else {
                println!("Found {} pending migration(s)", pending);
                println!("Run without --dry-run to apply them");
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            println!("Rolling back {} migration(s)...", steps);
            let reverted = revert_migrations(url, steps).await?;
            println!("Rolled back {} migration(s)", reverted);
            return Ok(());
        }

        println!("Running database migrations...");
        let applied = run_pending_migrations(url).await?;
        if applied.is_empty() {
            println!("No migrations to apply - database is already up to date");
        } else {
            println!("Applied {} migration(s):", applied.len());
            for migration in &applied {
                println!("  - {}", migration);
            }
        }

        Ok(())
    }
}
