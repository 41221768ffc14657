//! Reset Password Handler

use std::sync::Arc;

use bazaar_app::auth::PasswordReset;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{auth::into_status_error, extensions::*, messages::MessageResponse, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(equal = 6))]
    pub code: String,
    #[validate(length(min = 6))]
    pub new_password: String,
}

impl From<ResetPasswordRequest> for PasswordReset {
    fn from(request: ResetPasswordRequest) -> Self {
        PasswordReset {
            email: request.email,
            code: request.code,
            password: request.new_password,
        }
    }
}

/// Reset Password Handler
///
/// Sets a new password using an emailed reset code, consuming the code.
#[endpoint(
    tags("auth"),
    summary = "Reset Password",
    responses(
        (status_code = StatusCode::OK, description = "Password updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid code or password"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ResetPasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.validated()?;

    state
        .app
        .auth
        .reset_password(request.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("Password reset successful")))
}
