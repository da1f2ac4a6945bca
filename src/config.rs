use url::Url;

use crate::args::Args;

/// Connection settings for the target Supabase project.
///
/// Built once at the entry point and passed by parameter; both values are
/// required before any network call is attempted.
#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: Url,
    pub service_role_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing Supabase project URL (set SUPABASE_URL or pass --supabase-url)")]
    MissingUrl,
    #[error("missing service-role key (set SUPABASE_SERVICE_ROLE_KEY or pass --service-role-key)")]
    MissingServiceRoleKey,
}

impl Config {
    /// Resolve the configuration from parsed arguments.
    ///
    /// clap has already merged the CLI flags with their environment
    /// fallbacks, so a `None` here means neither source supplied the value.
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let supabase_url = args.supabase_url.clone().ok_or(ConfigError::MissingUrl)?;
        let service_role_key = args
            .service_role_key
            .clone()
            .ok_or(ConfigError::MissingServiceRoleKey)?;

        Ok(Self {
            supabase_url,
            service_role_key,
        })
    }
}
