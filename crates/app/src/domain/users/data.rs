//! Users Data

use crate::domain::users::records::{AuthType, Role, UserUuid};

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: Role,
    pub auth_type: AuthType,
    pub google_id: Option<String>,
    pub avatar: Option<String>,
}

/// Bootstrap administrator account details.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}
