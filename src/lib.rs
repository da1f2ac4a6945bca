pub mod api;
pub mod args;
pub mod config;
pub mod op;
pub mod ops;

pub use args::Args;
pub use config::{Config, ConfigError};

use clap::Subcommand;
use ops::{CreateAdminUser, CreateStorageBucket};

crate::command_enum! {
    (CreateAdminUser, CreateAdminUser),
    (CreateStorageBucket, CreateStorageBucket),
}
