//! Update Order Status Handler

use std::sync::Arc;

use bazaar_app::domain::orders::records::OrderStatus;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct UpdateStatusRequest {
    /// `Pending`, `Shipped` or `Delivered`
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatusUpdatedResponse {
    pub message: String,
    pub order: OrderResponse,
}

/// Update Order Status Handler
///
/// Any status may follow any other. Connected clients are told of the change.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order_id: PathParam<Uuid>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<StatusUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status: OrderStatus = json.into_inner().status.parse().or_400("Unknown status")?;

    let order = state
        .app
        .orders
        .update_status(order_id.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(StatusUpdatedResponse {
        message: "Order status updated".to_string(),
        order: order.into(),
    }))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::orders::{OrdersServiceError, records::OrderUuid};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, admin_service, make_order};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        admin_service(
            mocks,
            Router::with_path("order/update-status/{order_id}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_delivered_can_return_to_pending() -> TestResult {
        let uuid = OrderUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_update_status()
            .once()
            .withf(move |target, status| *target == uuid && *status == OrderStatus::Pending)
            .return_once(|uuid, status| Ok(make_order(uuid, status)));

        let body: StatusUpdatedResponse =
            TestClient::put(format!("http://example.com/order/update-status/{uuid}"))
                .json(&json!({ "status": "Pending" }))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(body.order.status, "Pending");
        assert_eq!(body.message, "Order status updated");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.orders.expect_update_status().never();

        let res = TestClient::put(format!(
            "http://example.com/order/update-status/{}",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "Lost" }))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_order_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_update_status()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/order/update-status/{}",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "Shipped" }))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
