//! Orders Data

use rust_decimal::Decimal;

use crate::domain::{
    orders::records::{OrderUuid, ShippingAddress},
    products::records::ProductUuid,
};

/// New Order Data
///
/// The total is recorded as submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub items: Vec<NewOrderItem>,
    pub total_price: Decimal,
    pub shipping_address: Option<ShippingAddress>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product: ProductUuid,
    pub quantity: i32,
}

impl NewOrder {
    pub(crate) fn is_valid(&self) -> bool {
        !self.items.is_empty()
            && self.items.iter().all(|item| item.quantity >= 1)
            && !self.total_price.is_sign_negative()
    }
}
