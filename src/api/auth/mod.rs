//! Supabase Auth admin endpoints (`/auth/v1/admin`).

mod create_user;
mod list_users;

pub use create_user::{CreateUserRequest, CreateUserResponse, UserMetadata};
pub use list_users::{AdminUser, ListUsersRequest, ListUsersResponse};
