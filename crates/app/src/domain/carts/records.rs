//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductRecord, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// A user's cart. Users without a stored cart see an empty one.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    pub user: UserUuid,
    pub items: Vec<CartItemRecord>,
}

impl CartRecord {
    #[must_use]
    pub fn empty(user: UserUuid) -> Self {
        Self {
            user,
            items: Vec::new(),
        }
    }
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// A cart line resolved against the product's current details.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub product: ProductRecord,
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
