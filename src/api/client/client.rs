use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};

use super::error::ApiError;
use super::ApiRequest;
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct ApiClient {
    pub base_url: Url,
    client: Client,
}

impl ApiClient {
    /// Build a client whose default headers carry the service-role
    /// credential the way the Supabase admin APIs expect it: as the
    /// `apikey` header and again as a bearer token.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut apikey = HeaderValue::from_str(&config.service_role_key)?;
        apikey.set_sensitive(true);
        default_headers.insert("apikey", apikey);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.service_role_key))?;
        bearer.set_sensitive(true);
        default_headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder().default_headers(default_headers).build()?;

        Ok(Self {
            base_url: config.supabase_url.clone(),
            client,
        })
    }

    pub async fn call<T: ApiRequest>(&mut self, request: T) -> Result<T::Response, ApiError> {
        let request_builder = request.build_request(&self.base_url, &self.client);
        let response = request_builder.send().await?;

        if response.status().is_success() {
            Ok(response.json::<T::Response>().await?)
        } else {
            Err(ApiError::HttpStatus(
                response.status(),
                response.text().await?,
            ))
        }
    }

    /// Variant of [`ApiClient::call`] for endpoints whose success response
    /// carries no useful body (PostgREST PATCH answers 200 or 204, usually
    /// empty).
    pub async fn call_no_content<T: ApiRequest>(
        &mut self,
        request: T,
    ) -> Result<StatusCode, ApiError> {
        let request_builder = request.build_request(&self.base_url, &self.client);
        let response = request_builder.send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(status)
        } else {
            Err(ApiError::HttpStatus(status, response.text().await?))
        }
    }
}
