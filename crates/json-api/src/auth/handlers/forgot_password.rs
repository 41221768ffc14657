//! Forgot Password Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    auth::verification_status_error, extensions::*, messages::MessageResponse, state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub(crate) struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

/// Forgot Password Handler
///
/// Emails a reset code to an existing password account.
#[endpoint(
    tags("auth"),
    summary = "Send Password Reset Code",
    responses(
        (status_code = StatusCode::OK, description = "Code sent"),
        (status_code = StatusCode::BAD_REQUEST, description = "Account signs in with Google"),
        (status_code = StatusCode::NOT_FOUND, description = "No account with this email"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ForgotPasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.validated()?;

    state
        .app
        .verification
        .send_password_reset(&request.email)
        .await
        .map_err(verification_status_error)?;

    Ok(Json(MessageResponse::new("Reset code sent")))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::verification::VerificationServiceError;
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, public_service};

    use super::*;

    async fn send(mocks: Mocks) -> Option<StatusCode> {
        TestClient::post("http://example.com/forgot-password")
            .json(&json!({ "email": "ada@example.com" }))
            .send(&public_service(
                mocks,
                Router::with_path("forgot-password").post(handler),
            ))
            .await
            .status_code
    }

    #[tokio::test]
    async fn test_forgot_password_success() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .verification
            .expect_send_password_reset()
            .once()
            .withf(|email| email == "ada@example.com")
            .return_once(|_| Ok(()));

        assert_eq!(send(mocks).await, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_forgot_password_unknown_email_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .verification
            .expect_send_password_reset()
            .once()
            .return_once(|_| Err(VerificationServiceError::NotFound));

        assert_eq!(send(mocks).await, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_forgot_password_google_account_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .verification
            .expect_send_password_reset()
            .once()
            .return_once(|_| Err(VerificationServiceError::ExternalAccount));

        assert_eq!(send(mocks).await, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
