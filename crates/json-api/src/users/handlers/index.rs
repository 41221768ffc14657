//! User Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, state::State, users::{errors::into_status_error, models::UserResponse}};

/// User Index Handler
///
/// Every account, newest first.
#[endpoint(
    tags("users"),
    summary = "List Users",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Accounts"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<UserResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = state
        .app
        .users
        .list_users()
        .await
        .map_err(into_status_error)?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}
