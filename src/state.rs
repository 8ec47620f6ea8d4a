//! Application state for Axum web framework.
//!
//! Contains the shared services that are accessible across all request handlers.

use std::sync::Arc;

use crate::db::AsyncDbPool;
use crate::repositories::{DieselUserRepository, UserRepository};
use crate::services::Services;

/// Application state containing all shared services.
///
/// This struct is designed to be used with Axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    /// Creates a new AppState backed by the PostgreSQL pool.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool);
    /// ```
    pub fn new(pool: AsyncDbPool) -> Self {
        Self::from_repository(Arc::new(DieselUserRepository::new(pool)))
    }

    /// Creates a new AppState over any repository implementation.
    pub fn from_repository(repo: Arc<dyn UserRepository>) -> Self {
        Self {
            services: Services::new(repo),
        }
    }
}
