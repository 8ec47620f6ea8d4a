//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - User-related request/response DTOs
//! - `error` - Common error and message bodies

mod error;
mod user;

pub use error::{ErrorResponse, MessageResponse};
pub use user::{CreateUserRequest, UserResponse};
