//! Google Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    auth::{into_status_error, models::SessionResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub(crate) struct GoogleLoginRequest {
    /// Google ID token from the browser sign-in flow.
    #[validate(length(min = 1))]
    pub token: String,
}

/// Google Login Handler
///
/// Signs in with a Google ID token, creating or linking the account by email.
#[endpoint(
    tags("auth"),
    summary = "Log In With Google",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Token is required"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid Google token"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<GoogleLoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.validated()?;

    let session = state
        .app
        .auth
        .login_with_google(&request.token)
        .await
        .map_err(into_status_error)?;

    Ok(Json(SessionResponse::start(
        res,
        state.cookies,
        session,
        "Login successful",
    )))
}

#[cfg(test)]
mod tests {
    use bazaar_app::{
        auth::{AuthServiceError, AuthSession, GoogleAuthError},
        domain::users::records::{AuthType, Role},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, make_user, public_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        public_service(mocks, Router::with_path("google").post(handler))
    }

    #[tokio::test]
    async fn test_google_login_returns_session() -> TestResult {
        let mut mocks = Mocks::default();
        let mut user = make_user("ada@gmail.com", Role::User);

        user.auth_type = AuthType::Google;

        mocks
            .auth
            .expect_login_with_google()
            .once()
            .withf(|token| token == "google-id-token")
            .return_once(move |_| {
                Ok(AuthSession {
                    token: "session-token".to_string(),
                    user,
                })
            });

        let body: SessionResponse = TestClient::post("http://example.com/google")
            .json(&json!({ "token": "google-id-token" }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(body.user.auth_type, "google");

        Ok(())
    }

    #[tokio::test]
    async fn test_google_login_rejected_token_returns_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_login_with_google()
            .once()
            .return_once(|_| Err(AuthServiceError::Google(GoogleAuthError::Rejected)));

        let res = TestClient::post("http://example.com/google")
            .json(&json!({ "token": "forged" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_google_login_empty_token_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.auth.expect_login_with_google().never();

        let res = TestClient::post("http://example.com/google")
            .json(&json!({ "token": "" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
