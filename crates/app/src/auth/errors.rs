//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::{GoogleAuthError, PasswordError, SessionError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("not authenticated")]
    Unauthorized,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    AlreadyExists,

    #[error("email address has not been verified")]
    EmailNotVerified,

    #[error("invalid or expired code")]
    InvalidCode,

    #[error("invalid data")]
    InvalidData,

    #[error("user not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("session token error")]
    Session(#[from] SessionError),

    #[error("password hashing failed")]
    Password(#[from] PasswordError),

    #[error("google sign-in failed")]
    Google(#[from] GoogleAuthError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
