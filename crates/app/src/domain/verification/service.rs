//! Verification service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        users::{
            records::{AuthType, normalise_email},
            repository::PgUsersRepository,
        },
        verification::{
            codes::{CODE_TTL, CODE_TTL_MINUTES, generate_code, hash_code},
            errors::VerificationServiceError,
            records::VerificationPurpose,
            repository::{PendingCode, PgVerificationCodesRepository},
        },
    },
    mail::{Mailer, is_plausible_email, templates},
};

/// Issues and checks emailed one-time codes.
#[derive(Clone)]
pub struct PgVerificationService {
    db: Db,
    codes: PgVerificationCodesRepository,
    users: PgUsersRepository,
    mailer: Arc<dyn Mailer>,
}

impl std::fmt::Debug for PgVerificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgVerificationService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgVerificationService {
    #[must_use]
    pub fn new(db: Db, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            db,
            codes: PgVerificationCodesRepository::new(),
            users: PgUsersRepository::new(),
            mailer,
        }
    }

    async fn verify(
        &self,
        email: &str,
        purpose: VerificationPurpose,
        code: &str,
    ) -> Result<(), VerificationServiceError> {
        let email = normalise_email(email);

        let mut tx = self.db.begin().await?;

        let verified = self
            .codes
            .mark_verified(&mut tx, &email, purpose, &hash_code(code), Timestamp::now())
            .await?;

        tx.commit().await?;

        if verified {
            Ok(())
        } else {
            Err(VerificationServiceError::InvalidCode)
        }
    }
}

#[async_trait]
impl VerificationService for PgVerificationService {
    async fn send_email_verification(
        &self,
        name: &str,
        email: &str,
    ) -> Result<(), VerificationServiceError> {
        let email = normalise_email(email);
        let name = name.trim();

        if name.is_empty() || !is_plausible_email(&email) {
            return Err(VerificationServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        if self.users.find_by_email(&mut tx, &email).await?.is_some() {
            return Err(VerificationServiceError::AlreadyExists);
        }

        let code = generate_code();
        let code_hash = hash_code(&code);

        self.codes
            .upsert_code(
                &mut tx,
                PendingCode {
                    email: &email,
                    purpose: VerificationPurpose::EmailVerification,
                    name: Some(name),
                    code_hash: &code_hash,
                    expires_at: Timestamp::now() + CODE_TTL,
                },
            )
            .await?;

        tx.commit().await?;

        let message = templates::verification_code(&email, name, &code, CODE_TTL_MINUTES)?;

        self.mailer.send(message).await?;

        info!(email = %email, "verification code sent");

        Ok(())
    }

    async fn verify_email_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<(), VerificationServiceError> {
        self.verify(email, VerificationPurpose::EmailVerification, code)
            .await
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), VerificationServiceError> {
        let email = normalise_email(email);

        let mut tx = self.db.begin().await?;

        let credentials = self
            .users
            .find_by_email(&mut tx, &email)
            .await?
            .ok_or(VerificationServiceError::NotFound)?;

        if credentials.user.auth_type == AuthType::Google && credentials.password_hash.is_none() {
            return Err(VerificationServiceError::ExternalAccount);
        }

        let code = generate_code();
        let code_hash = hash_code(&code);

        self.codes
            .upsert_code(
                &mut tx,
                PendingCode {
                    email: &email,
                    purpose: VerificationPurpose::PasswordReset,
                    name: None,
                    code_hash: &code_hash,
                    expires_at: Timestamp::now() + CODE_TTL,
                },
            )
            .await?;

        tx.commit().await?;

        let message = templates::password_reset_code(&email, &code, CODE_TTL_MINUTES)?;

        self.mailer.send(message).await?;

        info!(email = %email, "password reset code sent");

        Ok(())
    }

    async fn verify_reset_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<(), VerificationServiceError> {
        self.verify(email, VerificationPurpose::PasswordReset, code)
            .await
    }
}

#[automock]
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// Email a sign-up code to an address that has no account yet.
    async fn send_email_verification(
        &self,
        name: &str,
        email: &str,
    ) -> Result<(), VerificationServiceError>;

    /// Mark the sign-up code as verified so the address can register.
    async fn verify_email_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<(), VerificationServiceError>;

    /// Email a password reset code to an existing password account.
    async fn send_password_reset(&self, email: &str) -> Result<(), VerificationServiceError>;

    /// Check a reset code without consuming it.
    async fn verify_reset_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<(), VerificationServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{
        TestContext,
        helpers::{create_google_user, create_user, sent_code},
    };

    use super::*;

    #[tokio::test]
    async fn sends_code_to_new_address() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.verification
            .send_email_verification("Ada", "Ada@Example.com")
            .await?;

        let sent = ctx.mailer.sent();
        let email = sent.first().ok_or("no email sent")?;

        assert_eq!(email.to, "ada@example.com");

        let code = sent_code(&ctx)?;

        ctx.verification
            .verify_email_code("ada@example.com", &code)
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn refuses_code_for_existing_account() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, "ada@example.com").await?;

        let result = ctx
            .verification
            .send_email_verification("Ada", "ada@example.com")
            .await;

        assert!(
            matches!(result, Err(VerificationServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );
        assert!(ctx.mailer.sent().is_empty(), "nothing should be sent");

        Ok(())
    }

    #[tokio::test]
    async fn refuses_implausible_address() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .verification
            .send_email_verification("Ada", "ada.example.com")
            .await;

        assert!(
            matches!(result, Err(VerificationServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn wrong_code_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.verification
            .send_email_verification("Ada", "ada@example.com")
            .await?;

        let code = sent_code(&ctx)?;
        let wrong = if code == "000000" { "000001" } else { "000000" };

        let result = ctx
            .verification
            .verify_email_code("ada@example.com", wrong)
            .await;

        assert!(
            matches!(result, Err(VerificationServiceError::InvalidCode)),
            "expected InvalidCode, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn reset_for_unknown_address_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.verification.send_password_reset("nobody@example.com").await;

        assert!(
            matches!(result, Err(VerificationServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn reset_for_google_account_is_refused() -> TestResult {
        let ctx = TestContext::new().await;

        create_google_user(&ctx, "ada@example.com").await?;

        let result = ctx.verification.send_password_reset("ada@example.com").await;

        assert!(
            matches!(result, Err(VerificationServiceError::ExternalAccount)),
            "expected ExternalAccount, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn reset_code_verifies_for_password_account() -> TestResult {
        let ctx = TestContext::new().await;

        create_user(&ctx, "ada@example.com").await?;

        ctx.verification.send_password_reset("ada@example.com").await?;

        let code = sent_code(&ctx)?;

        ctx.verification
            .verify_reset_code("ada@example.com", &code)
            .await?;

        let result = ctx
            .verification
            .verify_email_code("ada@example.com", &code)
            .await;

        assert!(
            matches!(result, Err(VerificationServiceError::InvalidCode)),
            "reset code must not verify an email, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn mail_failure_is_reported() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.mailer.fail_next();

        let result = ctx
            .verification
            .send_email_verification("Ada", "ada@example.com")
            .await;

        assert!(
            matches!(result, Err(VerificationServiceError::Mail(_))),
            "expected Mail, got {result:?}"
        );

        Ok(())
    }
}
