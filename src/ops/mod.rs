pub mod admin_user;
pub mod storage_bucket;

pub use admin_user::CreateAdminUser;
pub use storage_bucket::CreateStorageBucket;
