//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use crate::{
    auth::{SESSION_COOKIE, into_status_error},
    extensions::*,
    state::State,
};

/// Resolve the session token to an [`Identity`](bazaar_app::auth::Identity)
/// and leave it in the depot, or answer 401.
#[salvo::handler]
pub(crate) async fn authenticate(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = session_token(req) else {
        reject(res, ctrl, StatusError::unauthorized().brief("Not authenticated"));

        return;
    };

    let auth = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(&state.app.auth),
        Err(error) => {
            reject(res, ctrl, error);

            return;
        }
    };

    match auth.authenticate(&token).await {
        Ok(identity) => depot.insert_identity(identity),
        Err(error) => {
            reject(res, ctrl, into_status_error(error));

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

/// Allow only administrators through. Runs after [`authenticate`].
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let is_admin = match depot.identity_or_401() {
        Ok(identity) => identity.role.is_admin(),
        Err(error) => {
            reject(res, ctrl, error);

            return;
        }
    };

    if !is_admin {
        reject(res, ctrl, StatusError::forbidden().brief("Admin access required"));

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

fn reject(res: &mut Response, ctrl: &mut FlowCtrl, error: StatusError) {
    res.render(error);
    ctrl.skip_rest();
}

/// Bearer header first, then the session cookie.
fn session_token(req: &Request) -> Option<String> {
    bearer_token(req)
        .or_else(|| req.cookie(SESSION_COOKIE).map(|cookie| cookie.value()))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    scheme.eq_ignore_ascii_case("bearer").then_some(token)
}
