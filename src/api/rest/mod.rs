//! PostgREST endpoints (`/rest/v1`).

mod update_profile;

pub use update_profile::{ProfileChanges, Role, UpdateProfileRequest};
