//! Check Auth Handler

use salvo::prelude::*;

use crate::{auth::models::IdentityResponse, extensions::*};

/// Check Auth Handler
///
/// Returns the signed-in caller.
#[endpoint(
    tags("auth"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<IdentityResponse>, StatusError> {
    let identity = depot.identity_or_401()?;

    Ok(Json(identity.into()))
}
