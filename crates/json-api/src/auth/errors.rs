//! Auth Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use bazaar_app::{
    auth::{AuthServiceError, GoogleAuthError},
    domain::verification::VerificationServiceError,
};

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::Unauthorized => StatusError::unauthorized().brief("Not authenticated"),
        AuthServiceError::InvalidCredentials => {
            StatusError::bad_request().brief("Invalid email or password")
        }
        AuthServiceError::AlreadyExists => StatusError::conflict().brief("User already exists"),
        AuthServiceError::EmailNotVerified => {
            StatusError::bad_request().brief("Email address has not been verified")
        }
        AuthServiceError::InvalidCode => StatusError::bad_request().brief("Invalid or expired code"),
        AuthServiceError::InvalidData => StatusError::bad_request().brief("Invalid account details"),
        AuthServiceError::NotFound => StatusError::not_found().brief("User not found"),
        AuthServiceError::Google(source) => google_status_error(source),
        AuthServiceError::Sql(source) => {
            error!("auth storage failure: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Session(source) => {
            error!("failed to issue session token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Password(source) => {
            error!("password hashing failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

fn google_status_error(error: GoogleAuthError) -> StatusError {
    match error {
        GoogleAuthError::NotConfigured => {
            warn!("google sign-in attempted without GOOGLE_CLIENT_ID");

            StatusError::service_unavailable().brief("Google sign-in is not available")
        }
        GoogleAuthError::Rejected
        | GoogleAuthError::AudienceMismatch
        | GoogleAuthError::UnverifiedEmail => {
            StatusError::unauthorized().brief("Invalid Google token")
        }
        GoogleAuthError::Http(source) => {
            error!("google token verification failed: {source}");

            StatusError::bad_gateway().brief("Could not reach Google")
        }
    }
}

pub(crate) fn verification_status_error(error: VerificationServiceError) -> StatusError {
    match error {
        VerificationServiceError::AlreadyExists => {
            StatusError::conflict().brief("User already exists")
        }
        VerificationServiceError::NotFound => {
            StatusError::not_found().brief("No account with this email")
        }
        VerificationServiceError::ExternalAccount => {
            StatusError::bad_request().brief("This account signs in with Google")
        }
        VerificationServiceError::InvalidCode => {
            StatusError::bad_request().brief("Invalid or expired code")
        }
        VerificationServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid name or email")
        }
        VerificationServiceError::Sql(source) => {
            error!("verification storage failure: {source}");

            StatusError::internal_server_error()
        }
        VerificationServiceError::Mail(source) => {
            error!("failed to send verification email: {source}");

            StatusError::bad_gateway().brief("Could not send email")
        }
    }
}
