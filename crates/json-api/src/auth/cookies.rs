//! Session cookie.

use salvo::http::cookie::{Cookie, SameSite};

pub(crate) const SESSION_COOKIE: &str = "jwt";

/// Builds the HTTP-only cookie carrying the session token.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SessionCookies {
    pub(crate) secure: bool,
}

impl SessionCookies {
    pub(crate) fn session(self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.secure)
            .build()
    }

    pub(crate) fn removal(self) -> Cookie<'static> {
        let mut cookie = self.session(String::new());

        cookie.make_removal();

        cookie
    }
}
