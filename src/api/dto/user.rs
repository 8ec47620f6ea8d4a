//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

use crate::models::User;

/// Request body for creating a new user.
///
/// `phone` may be omitted or `null`; both are stored as NULL.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Response body for user data.
///
/// `phone` is always present and serializes as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            phone: user.phone,
        }
    }
}
