//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        products::records::{ProductRecord, ProductUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Fulfilment stage of an order. Any stage may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// Where an order is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
}

impl ShippingAddress {
    /// Postal lines in display order, skipping a blank second address line.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.full_name.clone(), self.address_line1.clone()];

        if let Some(line2) = self
            .address_line2
            .as_deref()
            .map(str::trim)
            .filter(|line| !line.is_empty())
        {
            lines.push(line2.to_string());
        }

        lines.push(format!("{}, {} {}", self.city, self.state, self.zip_code));
        lines.push(self.phone.clone());

        lines
    }
}

/// The account an order belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCustomer {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
}

/// An order line. `product` is `None` once the product has been deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub product_uuid: ProductUuid,
    pub quantity: i32,
    pub product: Option<ProductRecord>,
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer: OrderCustomer,
    pub items: Vec<OrderItemRecord>,
    pub total_price: Decimal,
    pub shipping_address: Option<ShippingAddress>,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
