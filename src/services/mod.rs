//! Service layer for business logic operations.
//!
//! Each use case is a one-method trait (`execute`) with a single
//! implementation coordinating with the repository layer.

pub mod user;

use std::sync::Arc;

use crate::repositories::UserRepository;
use user::{CreateUser, CreateUserService, GetUserById, GetUserByIdService};

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Services {
    pub create_user: Arc<dyn CreateUserService>,
    pub get_user_by_id: Arc<dyn GetUserByIdService>,
}

impl Services {
    /// Creates every service over the same repository.
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self {
            create_user: Arc::new(CreateUser::new(repo.clone())),
            get_user_by_id: Arc::new(GetUserById::new(repo)),
        }
    }
}
