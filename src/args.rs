pub use clap::Parser;

use url::Url;

#[derive(Parser, Debug)]
#[command(name = "kyroo-admin")]
#[command(version)]
#[command(about = "One-shot admin provisioning for a Kyroo Supabase project")]
pub struct Args {
    /// Base URL of the Supabase project (e.g. https://xyz.supabase.co)
    #[arg(long, global = true, env = "SUPABASE_URL")]
    pub supabase_url: Option<Url>,

    /// Service-role secret key used to authenticate admin API calls
    #[arg(long, global = true, env = "SUPABASE_SERVICE_ROLE_KEY", hide_env_values = true)]
    pub service_role_key: Option<String>,

    #[command(subcommand)]
    pub command: crate::Command,
}
