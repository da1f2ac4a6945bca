use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::client::ApiRequest;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUsersRequest {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<AdminUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminUser {
    pub id: Uuid,
    /// Absent for phone-only accounts
    pub email: Option<String>,
}

impl ApiRequest for ListUsersRequest {
    type Response = ListUsersResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/auth/v1/admin/users").unwrap();
        let mut request = client.get(full_url);
        if let Some(page) = self.page {
            request = request.query(&[("page", page)]);
        }
        if let Some(per_page) = self.per_page {
            request = request.query(&[("per_page", per_page)]);
        }
        request
    }
}
