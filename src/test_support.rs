//! Test doubles shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::repositories::UserRepository;

/// In-memory store that assigns ids the way a SERIAL column does.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    calls: AtomicUsize,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repository calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_user_by_id(&self, id: i32) -> AppResult<User> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap();
        users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("user", "id", id))
    }

    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        let user = User {
            id: users.len() as i32 + 1,
            name: new_user.name,
            phone: new_user.phone,
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// Store whose every call fails the way a lost connection would.
pub struct FailingUserRepository;

impl FailingUserRepository {
    fn error(operation: &str) -> AppError {
        AppError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!("connection refused"),
        }
    }
}

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn get_user_by_id(&self, _id: i32) -> AppResult<User> {
        Err(Self::error("find user by id"))
    }

    async fn create_user(&self, _new_user: NewUser) -> AppResult<User> {
        Err(Self::error("insert user"))
    }
}

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that touch process environment variables.
pub fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Sets or removes environment variables and restores them on drop.
///
/// Hold [`lock_env`] for as long as the guard lives.
#[derive(Default)]
pub struct EnvGuard {
    vars_to_restore: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.vars_to_restore
            .push((key.to_string(), std::env::var(key).ok()));
        unsafe {
            std::env::set_var(key, value);
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.vars_to_restore
            .push((key.to_string(), std::env::var(key).ok()));
        unsafe {
            std::env::remove_var(key);
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // Reverse order so a key touched twice gets its first saved value back.
        for (key, original_value) in self.vars_to_restore.iter().rev() {
            unsafe {
                match original_value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
