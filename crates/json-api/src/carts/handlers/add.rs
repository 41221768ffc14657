//! Add Cart Item Handler

use std::sync::Arc;

use bazaar_app::domain::carts::{data::NewCartItem, records::CartItemUuid};
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct AddCartItemRequest {
    pub product_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

impl From<AddCartItemRequest> for NewCartItem {
    fn from(request: AddCartItemRequest) -> Self {
        NewCartItem {
            uuid: CartItemUuid::new(),
            product: request.product_id.into(),
            quantity: request.quantity,
        }
    }
}

/// Add Cart Item Handler
///
/// Adding a product already in the cart increases its quantity.
#[endpoint(
    tags("cart"),
    summary = "Add Product to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid fields"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.identity_or_401()?.user;
    let request = json.validated()?;

    let cart = state
        .app
        .carts
        .add_item(user, request.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
