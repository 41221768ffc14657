//! Auth Handlers

pub(crate) mod check_auth;
pub(crate) mod forgot_password;
pub(crate) mod google;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod reset_password;
pub(crate) mod send_verify_code;
pub(crate) mod signup;
pub(crate) mod verify_email_code;
pub(crate) mod verify_reset_code;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An emailed six digit code.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub(crate) struct CodeRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(equal = 6))]
    pub code: String,
}
