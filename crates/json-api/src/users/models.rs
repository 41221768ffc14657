//! User response bodies.

use bazaar_app::domain::users::records::UserRecord;
use jiff::Timestamp;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account as shown to its owner or an administrator. Password hashes
/// never leave the app crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub auth_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[salvo(schema(value_type = String))]
    pub created_at: Timestamp,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.uuid.into_uuid(),
            name: user.name,
            email: user.email,
            role: user.role.as_str().to_string(),
            auth_type: user.auth_type.as_str().to_string(),
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}
