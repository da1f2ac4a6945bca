//! Supabase Storage endpoints (`/storage/v1`).

mod create_bucket;

pub use create_bucket::{CreateBucketRequest, CreateBucketResponse};
