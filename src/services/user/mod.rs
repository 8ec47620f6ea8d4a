//! User use cases: the create command and the get-by-id query.

mod command;
mod query;

pub use command::{CreateUser, CreateUserService};
pub use query::{GetUserById, GetUserByIdService};
