//! Cart bodies.

use bazaar_app::domain::carts::records::{CartItemRecord, CartRecord};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::products::models::ProductResponse;

/// A cart line with the product's current details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub id: Uuid,
    pub quantity: i32,
    pub product: ProductResponse,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            id: item.uuid.into_uuid(),
            quantity: item.quantity,
            product: item.product.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    pub cart_items: Vec<CartItemResponse>,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        Self {
            cart_items: cart.items.into_iter().map(Into::into).collect(),
        }
    }
}
