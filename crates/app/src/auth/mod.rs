//! Authentication

mod errors;
pub mod google;
mod models;
mod password;
mod service;
mod session;

pub use errors::*;
pub use google::{GoogleAuthError, GoogleProfile, GoogleTokenVerifier, IdentityVerifier};
pub use models::*;
pub use password::*;
pub use service::*;
pub use session::*;
