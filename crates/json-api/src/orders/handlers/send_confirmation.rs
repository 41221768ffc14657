//! Send Order Confirmation Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    extensions::*, messages::MessageResponse, orders::errors::into_status_error,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct ConfirmationRequest {
    #[validate(email)]
    pub user_email: String,
    pub order_id: Uuid,
}

/// Send Order Confirmation Handler
///
/// Emails a summary of one of the caller's orders.
#[endpoint(
    tags("orders"),
    summary = "Send Order Confirmation",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Confirmation sent"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid email"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Could not send email"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ConfirmationRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.identity_or_401()?.user;
    let request = json.validated()?;

    state
        .app
        .orders
        .send_confirmation(user, &request.user_email, request.order_id.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("Confirmation email sent")))
}
