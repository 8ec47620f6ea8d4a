//! Database connection pool and schema migration module.
//!
//! Provides async PostgreSQL connection pooling using diesel_async with bb8,
//! plus embedded diesel migrations run over a blocking connection.

mod migrations;
mod pool;

pub use migrations::{MIGRATIONS, pending_migration_count, revert_migrations, run_pending_migrations};
pub use pool::{AsyncDbPool, establish_async_connection_pool};
