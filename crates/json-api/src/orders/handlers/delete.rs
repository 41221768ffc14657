//! Delete Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{OrderResponse, order_list},
    },
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderDeletedResponse {
    pub message: String,
    pub orders: Vec<OrderResponse>,
}

/// Delete Order Handler
///
/// Answers with every order that remains.
#[endpoint(
    tags("orders"),
    summary = "Delete Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed order id"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order_id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderDeletedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .delete_order(order_id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderDeletedResponse {
        message: "Order deleted successfully".to_string(),
        orders: order_list(orders),
    }))
}
