//! Signed session tokens.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::users::records::{Role, UserUuid};

/// Default session lifetime: seven days.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(24 * 7);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Owning user
    pub sub: Uuid,

    /// Role at the time of issue. Informational only; authorisation re-reads
    /// the stored role.
    pub role: Role,

    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session token is invalid or expired")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign session token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// HMAC keys and lifetime used to issue and verify session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: SignedDuration,
}

impl SessionKeys {
    #[must_use]
    pub fn new(secret: &[u8], ttl: SignedDuration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Issue a token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn issue(&self, user: UserUuid, role: Role) -> Result<String, SessionError> {
        self.issue_at(user, role, Timestamp::now())
    }

    pub(crate) fn issue_at(
        &self,
        user: UserUuid,
        role: Role,
        now: Timestamp,
    ) -> Result<String, SessionError> {
        let claims = Claims {
            sub: user.into_uuid(),
            role,
            exp: now.as_second().saturating_add(self.ttl.as_secs()),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(SessionError::Signing)
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Invalid`] for tampered, malformed, or expired tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);

        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(SessionError::Invalid)
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("keys", &"**redacted**")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::new(b"test-secret", DEFAULT_SESSION_TTL)
    }

    #[test]
    fn issued_token_verifies_with_same_keys() -> TestResult {
        let user = UserUuid::new();
        let token = keys().issue(user, Role::Admin)?;
        let claims = keys().verify(&token)?;

        assert_eq!(claims.sub, user.into_uuid());
        assert_eq!(claims.role, Role::Admin);

        Ok(())
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() -> TestResult {
        let token = SessionKeys::new(b"other", DEFAULT_SESSION_TTL).issue(UserUuid::new(), Role::User)?;

        assert!(matches!(keys().verify(&token), Err(SessionError::Invalid(_))));

        Ok(())
    }

    #[test]
    fn expired_token_is_rejected() -> TestResult {
        let issued_at = Timestamp::now() - SignedDuration::from_hours(24 * 8);
        let token = keys().issue_at(UserUuid::new(), Role::User, issued_at)?;

        assert!(matches!(keys().verify(&token), Err(SessionError::Invalid(_))));

        Ok(())
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(keys().verify("not.a.token").is_err());
    }

    #[test]
    fn debug_output_redacts_keys() {
        let rendered = format!("{:?}", keys());

        assert!(rendered.contains("redacted"), "keys should be redacted: {rendered}");
        assert!(!rendered.contains("test-secret"), "secret leaked: {rendered}");
    }
}
