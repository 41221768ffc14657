//! Auth data models.

use crate::domain::users::records::{Role, UserRecord, UserUuid};

/// Sign-up details for a password account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A password change authorised by an emailed reset code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReset {
    pub email: String,
    pub code: String,
    pub password: String,
}

/// A freshly issued session token and the account it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub user: UserRecord,
}

/// The caller behind a verified session token, with the role as currently
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: UserUuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&UserRecord> for Identity {
    fn from(user: &UserRecord) -> Self {
        Self {
            user: user.uuid,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
