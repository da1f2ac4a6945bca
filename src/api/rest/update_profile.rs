use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::client::ApiRequest;

/// Role column values of the `profiles` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileChanges {
    pub role: Role,
    pub display_name: String,
}

/// `PATCH /rest/v1/profiles?id=eq.{user_id}` — row filter in the query
/// string, changed columns in the body, PostgREST style.
#[derive(Debug, Clone)]
pub struct UpdateProfileRequest {
    pub user_id: Uuid,
    pub changes: ProfileChanges,
}

impl ApiRequest for UpdateProfileRequest {
    type Response = ();

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let mut full_url = base_url.join("/rest/v1/profiles").unwrap();
        full_url.set_query(Some(&format!("id=eq.{}", self.user_id)));
        client.patch(full_url).json(&self.changes)
    }
}
