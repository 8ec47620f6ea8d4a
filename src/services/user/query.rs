//! Get-user-by-id query.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::User;
use crate::repositories::UserRepository;

/// Reads a single user.
#[async_trait]
pub trait GetUserByIdService: Send + Sync {
    /// # Errors
    /// `AppError::NotFound` when the store has no user with that id, otherwise
    /// whatever the repository reported.
    async fn execute(&self, id: i32) -> AppResult<User>;
}

pub struct GetUserById {
    repo: Arc<dyn UserRepository>,
}

impl GetUserById {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    fn check_rules(&self, _id: i32) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl GetUserByIdService for GetUserById {
    async fn execute(&self, id: i32) -> AppResult<User> {
        self.check_rules(id)?;
        self.repo.get_user_by_id(id).await
    }
}
