//! Create-user command.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{NewUser, User};
use crate::repositories::UserRepository;

/// Persists a new user.
#[async_trait]
pub trait CreateUserService: Send + Sync {
    /// Creates a user and returns it with the id assigned by the store.
    ///
    /// Repository errors are returned unchanged.
    async fn execute(&self, name: String, phone: Option<String>) -> AppResult<User>;
}

pub struct CreateUser {
    repo: Arc<dyn UserRepository>,
}

impl CreateUser {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Business rules checked before the insert. None exist yet.
    fn check_rules(&self, _new_user: &NewUser) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl CreateUserService for CreateUser {
    async fn execute(&self, name: String, phone: Option<String>) -> AppResult<User> {
        let new_user = NewUser { name, phone };
        self.check_rules(&new_user)?;
        self.repo.create_user(new_user).await
    }
}
