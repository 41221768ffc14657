//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, messages::MessageResponse, state::State};

/// Logout Handler
///
/// Clears the session cookie. Tokens already handed out stay valid until
/// they expire.
#[endpoint(tags("auth"), summary = "Log Out")]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    res.add_cookie(state.cookies.removal());

    Ok(Json(MessageResponse::new("Logged out successfully")))
}
