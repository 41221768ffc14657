//! Send Verification Code Handler

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
pub(crate) struct SendVerifyCodeRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

/// Send Verification Code Handler
///
/// Emails a sign-up code to an address that has no account yet.
#[endpoint(
    tags("auth"),
    summary = "Send Email Verification Code",
    responses(
        (status_code = StatusCode::OK, description = "Code sent"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid name or email"),
        (status_code = StatusCode::CONFLICT, description = "User already exists"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Email could not be sent"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SendVerifyCodeRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.validated()?;

    state
        .app
        .verification
        .send_email_verification(&request.name, &request.email)
        .await
        .map_err(verification_status_error)?;

    Ok(Json(MessageResponse::new("Verification code sent")))
}
