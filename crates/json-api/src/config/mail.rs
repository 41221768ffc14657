//! Mail Config

use bazaar_app::mail::SmtpSettings;
use clap::Args;

/// SMTP relay settings. Mail is disabled when no host is configured.
#[derive(Debug, Args)]
pub struct MailConfig {
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: Option<String>,

    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    #[arg(long, env = "SMTP_USERNAME")]
    pub smtp_username: Option<String>,

    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,

    /// Sender mailbox, e.g. `Bazaar <no-reply@example.com>`
    #[arg(long, env = "MAIL_FROM", default_value = "Bazaar <no-reply@localhost>")]
    pub mail_from: String,
}

impl MailConfig {
    #[must_use]
    pub fn smtp_settings(&self) -> Option<SmtpSettings> {
        Some(SmtpSettings {
            host: self.smtp_host.clone()?,
            port: self.smtp_port,
            username: self.smtp_username.clone(),
            password: self.smtp_password.clone(),
            from_address: self.mail_from.clone(),
        })
    }
}
