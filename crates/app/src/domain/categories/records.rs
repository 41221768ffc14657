//! Category Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Category names compare case-insensitively, so they are stored trimmed and
/// lowercased. Returns `None` for a blank name.
#[must_use]
pub fn normalise_category_name(name: &str) -> Option<String> {
    let name = name.trim().to_lowercase();

    (!name.is_empty()).then_some(name)
}
