//! User Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{OrderResponse, order_list},
    },
    state::State,
};

/// User Orders Handler
///
/// The caller's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.identity_or_401()?.user;

    let orders = state
        .app
        .orders
        .list_user_orders(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order_list(orders)))
}
