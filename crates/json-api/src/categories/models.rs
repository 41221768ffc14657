//! Category bodies.

use bazaar_app::domain::categories::records::CategoryRecord;
use jiff::Timestamp;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    #[salvo(schema(value_type = String))]
    pub created_at: Timestamp,
    #[salvo(schema(value_type = String))]
    pub updated_at: Timestamp,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        Self {
            id: category.uuid.into_uuid(),
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// Names are trimmed and lowercased before storage.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub(crate) struct CategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}
