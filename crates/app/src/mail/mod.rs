//! Outbound transactional email.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

mod smtp;
pub mod templates;

pub use smtp::{SmtpMailer, SmtpSettings};

/// A rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail delivery is not configured")]
    NotConfigured,

    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

/// Used when no SMTP relay is configured; every send fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredMailer;

#[async_trait]
impl Mailer for UnconfiguredMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        tracing::warn!(subject = %email.subject, "dropping email: no SMTP relay configured");

        Err(MailError::NotConfigured)
    }
}

/// Loose syntactic check for a deliverable address: one `@`, a non-empty
/// local part, and a dotted domain.
#[must_use]
pub fn is_plausible_email(address: &str) -> bool {
    let address = address.trim();

    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !address.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(head, tail)| !head.is_empty() && !tail.is_empty() && !tail.ends_with('.'))
}
