//! Verification service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::mail::MailError;

#[derive(Debug, Error)]
pub enum VerificationServiceError {
    #[error("an account with this email already exists")]
    AlreadyExists,

    #[error("no account with this email")]
    NotFound,

    #[error("account signs in with Google")]
    ExternalAccount,

    #[error("invalid or expired code")]
    InvalidCode,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("failed to send code")]
    Mail(#[from] MailError),
}

impl From<Error> for VerificationServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::ForeignKeyViolation | ErrorKind::Other | _)
            | None => Self::Sql(error),
        }
    }
}
