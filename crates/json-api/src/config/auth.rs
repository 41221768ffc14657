//! Auth Config

use bazaar_app::domain::users::data::AdminSeed;
use clap::Args;
use jiff::SignedDuration;

/// Session and sign-in settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret used to sign session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Session lifetime in hours
    #[arg(long, env = "SESSION_TTL_HOURS", default_value_t = 168)]
    pub session_ttl_hours: i64,

    /// Mark the session cookie `Secure`
    #[arg(long, env = "COOKIE_SECURE", default_value_t = false)]
    pub cookie_secure: bool,

    /// OAuth client id Google ID tokens must be issued for
    #[arg(long, env = "GOOGLE_CLIENT_ID")]
    pub google_client_id: Option<String>,

    /// Email of the administrator ensured at startup
    #[arg(long, env = "ADMIN_EMAIL")]
    pub admin_email: Option<String>,

    /// Password of the administrator ensured at startup
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    #[arg(long, env = "ADMIN_NAME", default_value = "Administrator")]
    pub admin_name: String,
}

impl AuthConfig {
    #[must_use]
    pub fn session_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(self.session_ttl_hours)
    }

    /// The administrator to ensure, when both email and password are set.
    #[must_use]
    pub fn admin_seed(&self) -> Option<AdminSeed> {
        let email = self.admin_email.as_deref()?;
        let password = self.admin_password.as_deref()?;

        Some(AdminSeed {
            name: self.admin_name.clone(),
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}
