//! Repository layer for data access operations.
//!
//! Services depend on the [`UserRepository`] trait; the Diesel-backed
//! implementation is picked once at startup.

mod user_repo;

pub use user_repo::{DieselUserRepository, UserRepository};
