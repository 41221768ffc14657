//! Google ID token verification.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Google's token introspection endpoint.
pub const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Verified identity claims extracted from a Google ID token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleProfile {
    pub subject: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[derive(Debug, Error)]
pub enum GoogleAuthError {
    #[error("google sign-in is not configured")]
    NotConfigured,

    #[error("google rejected the id token")]
    Rejected,

    #[error("id token was issued for a different client")]
    AudienceMismatch,

    #[error("google account email is not verified")]
    UnverifiedEmail,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

#[automock]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Exchange a client-supplied ID token for verified profile claims.
    async fn verify(&self, id_token: &str) -> Result<GoogleProfile, GoogleAuthError>;
}

/// Verifies ID tokens by asking Google's tokeninfo endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTokenVerifier {
    client_id: Option<String>,
    tokeninfo_url: String,
    http: Client,
}

impl GoogleTokenVerifier {
    #[must_use]
    pub fn new(client_id: Option<String>) -> Self {
        Self::with_endpoint(client_id, GOOGLE_TOKENINFO_URL.to_string())
    }

    #[must_use]
    pub fn with_endpoint(client_id: Option<String>, tokeninfo_url: String) -> Self {
        Self {
            client_id,
            tokeninfo_url,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for GoogleTokenVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleProfile, GoogleAuthError> {
        let Some(client_id) = self.client_id.as_deref() else {
            return Err(GoogleAuthError::NotConfigured);
        };

        let response = self
            .http
            .get(&self.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await?;

        if response.status().is_client_error() {
            return Err(GoogleAuthError::Rejected);
        }

        let info: TokenInfo = response.error_for_status()?.json().await?;

        info.into_profile(client_id)
    }
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    email: Option<String>,
    email_verified: Option<EmailVerified>,
    name: Option<String>,
    picture: Option<String>,
}

/// tokeninfo reports booleans as strings; accept either shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmailVerified {
    Bool(bool),
    Text(String),
}

impl EmailVerified {
    fn is_true(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Text(value) => value.eq_ignore_ascii_case("true"),
        }
    }
}

impl TokenInfo {
    fn into_profile(self, client_id: &str) -> Result<GoogleProfile, GoogleAuthError> {
        if self.aud != client_id {
            return Err(GoogleAuthError::AudienceMismatch);
        }

        let verified = self.email_verified.as_ref().is_some_and(EmailVerified::is_true);

        let Some(email) = self.email.filter(|_| verified) else {
            return Err(GoogleAuthError::UnverifiedEmail);
        };

        Ok(GoogleProfile {
            subject: self.sub,
            email,
            name: self.name,
            picture: self.picture,
        })
    }
}
