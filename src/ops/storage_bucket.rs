use clap::Args;
use reqwest::StatusCode;

use crate::api::client::ApiError;
use crate::api::storage::CreateBucketRequest;

#[derive(Args, Debug, Clone)]
pub struct CreateStorageBucket {
    /// Bucket identifier (also used as its display name)
    #[arg(long, default_value = "avatars")]
    pub bucket: String,

    /// Create the bucket private instead of publicly readable
    #[arg(long)]
    pub private: bool,

    /// MIME types accepted for upload
    #[arg(
        long = "allow-mime",
        value_delimiter = ',',
        default_value = "image/png,image/jpeg,image/gif,image/webp"
    )]
    pub allowed_mime_types: Vec<String>,

    /// Largest accepted object, in bytes
    #[arg(long, default_value_t = 5 * 1024 * 1024)]
    pub file_size_limit: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum BucketCreateError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Row-level-security statements for the bucket.
///
/// Advisory output only: this tool prints the block and never executes it.
pub fn access_policy_sql(bucket_id: &str, public: bool) -> String {
    let mut sql = format!(
        r#"-- Authenticated users may upload objects under their own folder
CREATE POLICY "Users can upload their own objects in {bucket_id}" ON storage.objects
FOR INSERT WITH CHECK (
    bucket_id = '{bucket_id}'
    AND auth.uid()::text = (storage.foldername(name))[1]
);

-- Authenticated users may replace objects under their own folder
CREATE POLICY "Users can update their own objects in {bucket_id}" ON storage.objects
FOR UPDATE USING (
    bucket_id = '{bucket_id}'
    AND auth.uid()::text = (storage.foldername(name))[1]
);
"#
    );
    if public {
        sql.push_str(&format!(
            r#"
-- Anyone may read objects in the bucket
CREATE POLICY "Objects in {bucket_id} are publicly readable" ON storage.objects
FOR SELECT USING (bucket_id = '{bucket_id}');
"#
        ));
    }
    sql
}

fn policy_advisory(bucket_id: &str, public: bool) -> String {
    format!(
        "Recommended row-level-security policies (not applied automatically).\n\
         Review and run them in the Supabase dashboard SQL editor:\n\n{}",
        access_policy_sql(bucket_id, public)
    )
}

#[async_trait::async_trait]
impl crate::op::Op for CreateStorageBucket {
    type Error = BucketCreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let public = !self.private;
        let mut client = ctx.client.clone();

        tracing::info!(
            "creating storage bucket {} at {}",
            self.bucket,
            ctx.config.supabase_url
        );

        let request = CreateBucketRequest {
            id: self.bucket.clone(),
            name: self.bucket.clone(),
            public,
            allowed_mime_types: self.allowed_mime_types.clone(),
            file_size_limit: self.file_size_limit,
        };

        match client.call(request).await {
            Ok(response) => {
                tracing::info!("bucket {} created", response.name);
                Ok(format!(
                    "Created storage bucket: {} (public: {}, size limit: {} bytes)\n\n{}",
                    response.name,
                    public,
                    self.file_size_limit,
                    policy_advisory(&self.bucket, public)
                ))
            }
            Err(ApiError::HttpStatus(StatusCode::BAD_REQUEST, body))
                if body.contains("already exists") =>
            {
                tracing::info!("bucket {} already exists; leaving it unchanged", self.bucket);
                Ok(format!(
                    "Storage bucket {} already exists; leaving it unchanged\n\n{}",
                    self.bucket,
                    policy_advisory(&self.bucket, public)
                ))
            }
            Err(e) => Err(e.into()),
        }
    }
}
