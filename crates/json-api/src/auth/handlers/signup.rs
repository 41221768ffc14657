//! Signup Handler

use std::sync::Arc;

use bazaar_app::auth::NewAccount;
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
pub(crate) struct SignupRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

impl From<SignupRequest> for NewAccount {
    fn from(request: SignupRequest) -> Self {
        NewAccount {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Signup Handler
///
/// Creates a password account for an email whose verification code has
/// already been confirmed, and signs it in.
#[endpoint(
    tags("auth"),
    summary = "Sign Up",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid details or unverified email"),
        (status_code = StatusCode::CONFLICT, description = "User already exists"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SignupRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.validated()?;

    let session = state
        .app
        .auth
        .signup(request.into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(SessionResponse::start(
        res,
        state.cookies,
        session,
        "User registered",
    )))
}
