//! Authentication

mod cookies;
mod errors;
pub(crate) mod handlers;
pub(crate) mod middleware;
mod models;

pub(crate) use cookies::{SESSION_COOKIE, SessionCookies};
pub(crate) use errors::*;
pub(crate) use handlers::*;
