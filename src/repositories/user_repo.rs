//! User repository for async database operations.
//!
//! Provides the lookup and insert operations for the users table using diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{NewUser, User};

/// Persistence contract for users.
///
/// Implementations own their storage handle and are shared behind an `Arc`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetches the user with the given id.
    ///
    /// # Errors
    /// - `AppError::NotFound` when no row has that id
    /// - `AppError::Database` / `AppError::ConnectionPool` when the store fails
    async fn get_user_by_id(&self, id: i32) -> AppResult<User>;

    /// Persists a new user and returns it with its generated id.
    ///
    /// Nothing is validated here; constraint violations surface as
    /// `AppError::Database` carrying the store's message.
    async fn create_user(&self, new_user: NewUser) -> AppResult<User>;
}

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: AsyncDbPool,
}

impl DieselUserRepository {
    /// Creates a new DieselUserRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn get_user_by_id(&self, user_id: i32) -> AppResult<User> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .find(user_id)
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find user by id"))?
            .ok_or_else(|| AppError::not_found("user", "id", user_id))
    }

    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        let user = diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert user"))?;

        tracing::debug!(user_id = user.id, "Inserted user");
        Ok(user)
    }
}
