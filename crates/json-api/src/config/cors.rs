//! CORS Config

use clap::Args;

#[derive(Debug, Args)]
pub struct CorsConfig {
    /// Browser origin allowed to call the API with credentials
    #[arg(long, env = "CLIENT_URL", default_value = "http://localhost:5173")]
    pub client_url: String,
}
