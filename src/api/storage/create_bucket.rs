use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::api::client::ApiRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBucketRequest {
    /// Bucket identifier; Supabase also uses it as the display name
    pub id: String,
    pub name: String,
    pub public: bool,
    pub allowed_mime_types: Vec<String>,
    pub file_size_limit: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBucketResponse {
    pub name: String,
}

impl ApiRequest for CreateBucketRequest {
    type Response = CreateBucketResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/storage/v1/bucket").unwrap();
        client.post(full_url).json(&self)
    }
}
