//! Update User Role Handler

use std::sync::Arc;

use bazaar_app::domain::users::records::Role;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct UpdateRoleRequest {
    /// `user` or `admin`
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RoleUpdatedResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Update User Role Handler
#[endpoint(
    tags("users"),
    summary = "Change User Role",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Role updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown role"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<UpdateRoleRequest>,
    depot: &mut Depot,
) -> Result<Json<RoleUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let role: Role = json.into_inner().role.parse().or_400("Unknown role")?;

    let user = state
        .app
        .users
        .update_role(id.into_inner().into(), role)
        .await
        .map_err(into_status_error)?;

    Ok(Json(RoleUpdatedResponse {
        message: "User role updated".to_string(),
        user: user.into(),
    }))
}
