use clap::Args;
use uuid::Uuid;

use crate::api::auth::{CreateUserRequest, ListUsersRequest, UserMetadata};
use crate::api::client::{ApiClient, ApiError};
use crate::api::rest::{ProfileChanges, Role, UpdateProfileRequest};

#[derive(Args, Debug, Clone)]
pub struct CreateAdminUser {
    /// Email address of the admin account
    #[arg(long)]
    pub email: String,

    /// Password for the admin account
    #[arg(long)]
    pub password: String,

    /// Display name for the account (defaults to the local part of the email)
    #[arg(long)]
    pub display_name: Option<String>,

    /// If the address is already registered, look the account up and
    /// elevate it instead of failing
    #[arg(long)]
    pub update_existing: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateAdminUserError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("user {0} is already registered but missing from the user list")]
    ExistingUserNotFound(String),
}

/// Local part of the address, used when no display name was given.
fn default_display_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[async_trait::async_trait]
impl crate::op::Op for CreateAdminUser {
    type Error = CreateAdminUserError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let display_name = self
            .display_name
            .clone()
            .unwrap_or_else(|| default_display_name(&self.email));

        let mut client = ctx.client.clone();

        tracing::info!(
            "creating admin user {} at {}",
            self.email,
            ctx.config.supabase_url
        );

        let request = CreateUserRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            email_confirm: true,
            user_metadata: UserMetadata {
                display_name: display_name.clone(),
            },
        };

        let (user_id, created) = match client.call(request).await {
            Ok(user) => {
                tracing::info!("user created with id {}", user.id);
                (user.id, true)
            }
            Err(ApiError::HttpStatus(status, body))
                if self.update_existing && body.contains("already registered") =>
            {
                tracing::info!(
                    "{} is already registered (status {}); looking the account up",
                    self.email,
                    status
                );
                let id = self.find_existing_user(&mut client).await?;
                (id, false)
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!("setting admin role on profile {}", user_id);

        let update = UpdateProfileRequest {
            user_id,
            changes: ProfileChanges {
                role: Role::Admin,
                display_name: display_name.clone(),
            },
        };

        if created {
            // The account exists at this point; a failed role update is
            // reported as a warning, not a failure.
            match client.call_no_content(update).await {
                Ok(_) => Ok(format!(
                    "Created admin user: {} (id: {}, display name: {})",
                    self.email, user_id, display_name
                )),
                Err(e) => {
                    tracing::warn!("failed to set admin role on profile {}: {}", user_id, e);
                    Ok(format!(
                        "Created user: {} (id: {})\n\
                         Warning: the admin role could not be set ({}); the account exists but may lack admin access",
                        self.email, user_id, e
                    ))
                }
            }
        } else {
            client.call_no_content(update).await?;
            Ok(format!(
                "Elevated existing user {} (id: {}) to admin",
                self.email, user_id
            ))
        }
    }
}

impl CreateAdminUser {
    async fn find_existing_user(
        &self,
        client: &mut ApiClient,
    ) -> Result<Uuid, CreateAdminUserError> {
        let response = client.call(ListUsersRequest::default()).await?;
        response
            .users
            .into_iter()
            .find(|u| u.email.as_deref() == Some(self.email.as_str()))
            .map(|u| u.id)
            .ok_or_else(|| CreateAdminUserError::ExistingUserNotFound(self.email.clone()))
    }
}
