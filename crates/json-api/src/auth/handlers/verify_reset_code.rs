//! Verify Reset Code Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    auth::{handlers::CodeRequest, verification_status_error},
    extensions::*,
    messages::MessageResponse,
    state::State,
};

/// Verify Reset Code Handler
///
/// Checks a reset code without consuming it.
#[endpoint(
    tags("auth"),
    summary = "Verify Password Reset Code",
    responses(
        (status_code = StatusCode::OK, description = "Code is valid"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or expired code"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CodeRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.validated()?;

    state
        .app
        .verification
        .verify_reset_code(&request.email, &request.code)
        .await
        .map_err(verification_status_error)?;

    Ok(Json(MessageResponse::new("Code verified")))
}
