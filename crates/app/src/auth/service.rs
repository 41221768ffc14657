//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    auth::{
        AuthServiceError, AuthSession, Identity, IdentityVerifier, NewAccount, PasswordReset,
        SessionKeys, hash_password, is_acceptable_password, verify_password,
    },
    database::Db,
    domain::{
        users::{
            data::NewUser,
            records::{AuthType, Role, UserRecord, UserUuid, normalise_email},
            repository::PgUsersRepository,
        },
        verification::{
            codes::hash_code, records::VerificationPurpose,
            repository::PgVerificationCodesRepository,
        },
    },
    mail::is_plausible_email,
};

/// Password, session and Google sign-in backed by Postgres.
#[derive(Clone)]
pub struct PgAuthService {
    db: Db,
    users: PgUsersRepository,
    codes: PgVerificationCodesRepository,
    keys: SessionKeys,
    google: Arc<dyn IdentityVerifier>,
}

impl std::fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgAuthService")
            .field("db", &self.db)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, keys: SessionKeys, google: Arc<dyn IdentityVerifier>) -> Self {
        Self {
            db,
            users: PgUsersRepository::new(),
            codes: PgVerificationCodesRepository::new(),
            keys,
            google,
        }
    }

    fn session_for(&self, user: UserRecord) -> Result<AuthSession, AuthServiceError> {
        let token = self.keys.issue(user.uuid, user.role)?;

        Ok(AuthSession { token, user })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn signup(&self, account: NewAccount) -> Result<AuthSession, AuthServiceError> {
        let email = normalise_email(&account.email);
        let name = account.name.trim();

        if name.is_empty()
            || !is_plausible_email(&email)
            || !is_acceptable_password(&account.password)
        {
            return Err(AuthServiceError::InvalidData);
        }

        let password_hash = hash_password(&account.password)?;

        let mut tx = self.db.begin().await?;

        if self.users.find_by_email(&mut tx, &email).await?.is_some() {
            return Err(AuthServiceError::AlreadyExists);
        }

        let verified = self
            .codes
            .take_verified(
                &mut tx,
                &email,
                VerificationPurpose::EmailVerification,
                Timestamp::now(),
            )
            .await?;

        if !verified {
            return Err(AuthServiceError::EmailNotVerified);
        }

        let user = self
            .users
            .create_user(
                &mut tx,
                NewUser {
                    uuid: UserUuid::new(),
                    name: name.to_string(),
                    email,
                    password_hash: Some(password_hash),
                    role: Role::User,
                    auth_type: AuthType::Local,
                    google_id: None,
                    avatar: None,
                },
            )
            .await?;

        tx.commit().await?;

        info!(user = %user.uuid, "account created");

        self.session_for(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthServiceError> {
        let email = normalise_email(email);

        let mut tx = self.db.begin().await?;

        let credentials = self.users.find_by_email(&mut tx, &email).await?;

        tx.commit().await?;

        let Some(credentials) = credentials else {
            debug!("login for unknown email");
            return Err(AuthServiceError::InvalidCredentials);
        };

        let matches = credentials
            .password_hash
            .as_deref()
            .is_some_and(|stored| verify_password(password, stored));

        if !matches {
            debug!(user = %credentials.user.uuid, "login with wrong password");
            return Err(AuthServiceError::InvalidCredentials);
        }

        self.session_for(credentials.user)
    }

    async fn login_with_google(&self, id_token: &str) -> Result<AuthSession, AuthServiceError> {
        let profile = self.google.verify(id_token).await?;
        let email = normalise_email(&profile.email);

        let mut tx = self.db.begin().await?;

        let user = match self.users.find_by_email(&mut tx, &email).await? {
            Some(credentials) if credentials.user.google_id.is_none() => {
                self.users
                    .link_google_account(
                        &mut tx,
                        credentials.user.uuid,
                        &profile.subject,
                        profile.picture.as_deref(),
                    )
                    .await?
            }
            Some(credentials) => credentials.user,
            None => {
                let name = profile
                    .name
                    .clone()
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| email.clone());

                let created = self
                    .users
                    .create_user(
                        &mut tx,
                        NewUser {
                            uuid: UserUuid::new(),
                            name,
                            email,
                            password_hash: None,
                            role: Role::User,
                            auth_type: AuthType::Google,
                            google_id: Some(profile.subject.clone()),
                            avatar: profile.picture.clone(),
                        },
                    )
                    .await?;

                info!(user = %created.uuid, "account created from google sign-in");

                created
            }
        };

        tx.commit().await?;

        self.session_for(user)
    }

    async fn authenticate(&self, token: &str) -> Result<Identity, AuthServiceError> {
        let claims = self
            .keys
            .verify(token)
            .map_err(|_ignored| AuthServiceError::Unauthorized)?;

        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .get_user(&mut tx, UserUuid::from_uuid(claims.sub))
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => AuthServiceError::Unauthorized,
                other => AuthServiceError::from(other),
            })?;

        tx.commit().await?;

        Ok(Identity::from(&user))
    }

    async fn reset_password(&self, reset: PasswordReset) -> Result<(), AuthServiceError> {
        let email = normalise_email(&reset.email);

        if !is_acceptable_password(&reset.password) {
            return Err(AuthServiceError::InvalidData);
        }

        let password_hash = hash_password(&reset.password)?;

        let mut tx = self.db.begin().await?;

        let consumed = self
            .codes
            .consume_code(
                &mut tx,
                &email,
                VerificationPurpose::PasswordReset,
                &hash_code(&reset.code),
                Timestamp::now(),
            )
            .await?;

        if !consumed {
            return Err(AuthServiceError::InvalidCode);
        }

        let rows_affected = self
            .users
            .update_password(&mut tx, &email, &password_hash)
            .await?;

        if rows_affected == 0 {
            return Err(AuthServiceError::NotFound);
        }

        tx.commit().await?;

        info!(email = %email, "password reset");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a password account for an email whose sign-up code has been
    /// verified, consuming that verification.
    async fn signup(&self, account: NewAccount) -> Result<AuthSession, AuthServiceError>;

    /// Exchange an email and password for a session.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthServiceError>;

    /// Exchange a Google ID token for a session, creating or linking the
    /// account by email.
    async fn login_with_google(&self, id_token: &str) -> Result<AuthSession, AuthServiceError>;

    /// Resolve a session token to the account it was issued for.
    async fn authenticate(&self, token: &str) -> Result<Identity, AuthServiceError>;

    /// Set a new password using an emailed reset code, consuming the code.
    async fn reset_password(&self, reset: PasswordReset) -> Result<(), AuthServiceError>;
}
