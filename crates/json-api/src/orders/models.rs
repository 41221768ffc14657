//! Order bodies.

use bazaar_app::domain::orders::{
    data::{NewOrder, NewOrderItem},
    records::{OrderCustomer, OrderItemRecord, OrderRecord, OrderUuid, ShippingAddress},
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::products::models::ProductResponse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderUserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<OrderCustomer> for OrderUserResponse {
    fn from(customer: OrderCustomer) -> Self {
        Self {
            id: customer.uuid.into_uuid(),
            name: customer.name,
            email: customer.email,
        }
    }
}

/// An order line. `product` is absent once the product has been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub product_id: Uuid,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductResponse>,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            product_id: item.product_uuid.into_uuid(),
            quantity: item.quantity,
            product: item.product.map(Into::into),
        }
    }
}

/// Delivery address as shown to clients. Orders placed without one render
/// as an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShippingAddressResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<Option<ShippingAddress>> for ShippingAddressResponse {
    fn from(address: Option<ShippingAddress>) -> Self {
        let Some(address) = address else {
            return Self::default();
        };

        Self {
            full_name: Some(address.full_name),
            address_line1: Some(address.address_line1),
            address_line2: address.address_line2,
            city: Some(address.city),
            state: Some(address.state),
            zip_code: Some(address.zip_code),
            phone: Some(address.phone),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub id: Uuid,
    pub user: OrderUserResponse,
    pub items: Vec<OrderItemResponse>,
    #[salvo(schema(value_type = f64))]
    pub total_price: Decimal,
    pub shipping_address: ShippingAddressResponse,
    /// `Pending`, `Shipped` or `Delivered`
    pub status: String,
    #[salvo(schema(value_type = String))]
    pub created_at: Timestamp,
    #[salvo(schema(value_type = String))]
    pub updated_at: Timestamp,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            id: order.uuid.into_uuid(),
            user: order.customer.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            total_price: order.total_price,
            shipping_address: order.shipping_address.into(),
            status: order.status.as_str().to_string(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

pub(crate) fn order_list(orders: Vec<OrderRecord>) -> Vec<OrderResponse> {
    orders.into_iter().map(Into::into).collect()
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct OrderItemRequest {
    pub product_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct ShippingAddressRequest {
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(length(min = 1))]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[validate(length(min = 1))]
    pub zip_code: String,
    #[validate(length(min = 1))]
    pub phone: String,
}

impl From<ShippingAddressRequest> for ShippingAddress {
    fn from(request: ShippingAddressRequest) -> Self {
        ShippingAddress {
            full_name: request.full_name,
            address_line1: request.address_line1,
            address_line2: request
                .address_line2
                .filter(|line| !line.trim().is_empty()),
            city: request.city,
            state: request.state,
            zip_code: request.zip_code,
            phone: request.phone,
        }
    }
}

/// The total is stored as submitted.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct CreateOrderRequest {
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderItemRequest>,
    #[salvo(schema(value_type = f64))]
    #[validate(custom(function = "money_amount"))]
    pub total_price: Decimal,
    #[serde(default)]
    #[validate(nested)]
    pub shipping_address: Option<ShippingAddressRequest>,
}

impl CreateOrderRequest {
    pub(crate) fn into_new_order(self, uuid: OrderUuid) -> NewOrder {
        NewOrder {
            uuid,
            items: self
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    product: item.product_id.into(),
                    quantity: item.quantity,
                })
                .collect(),
            total_price: self.total_price,
            shipping_address: self.shipping_address.map(Into::into),
        }
    }
}

/// Totals are kept to the cent.
fn money_amount(total: &Decimal) -> Result<(), ValidationError> {
    if total.is_sign_negative() {
        return Err(ValidationError::new("non_negative"));
    }

    if total.normalize().scale() > 2 {
        return Err(ValidationError::new("cents"));
    }

    Ok(())
}
