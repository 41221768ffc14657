//! Auth response bodies.

use bazaar_app::auth::{AuthSession, Identity};
use salvo::{oapi::ToSchema, prelude::Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth::SessionCookies, users::models::UserResponse};

/// A newly started session. The token is also set as the `jwt` cookie.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

impl SessionResponse {
    /// Attach the session cookie to `res` and build the body.
    pub(crate) fn start(
        res: &mut Response,
        cookies: SessionCookies,
        session: AuthSession,
        message: &str,
    ) -> Self {
        res.add_cookie(cookies.session(session.token.clone()));

        Self {
            message: message.to_string(),
            token: session.token,
            user: session.user.into(),
        }
    }
}

/// The signed-in caller.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IdentityResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.user.into_uuid(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            role: identity.role.as_str().to_string(),
        }
    }
}
