//! Wire frames for order events.

use bazaar_app::notifications::OrderEvent;
use serde::Serialize;
use uuid::Uuid;

use crate::orders::models::{OrderResponse, order_list};

/// `{"event": <name>, "data": <payload>}`
#[derive(Debug, Serialize)]
struct Frame<'a, T> {
    event: &'a str,
    data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderCreatedData {
    new_order: OrderResponse,
    orders: Vec<OrderResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderStatusUpdatedData {
    order_id: Uuid,
    new_status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderDeletedData {
    orders: Vec<OrderResponse>,
    deleted_order_id: Uuid,
}

/// Render an event as the JSON text frame sent to subscribers.
pub(super) fn encode(event: OrderEvent) -> serde_json::Result<String> {
    let name = event.name();

    match event {
        OrderEvent::Created { order, orders } => serde_json::to_string(&Frame {
            event: name,
            data: OrderCreatedData {
                new_order: order.into(),
                orders: order_list(orders),
            },
        }),
        OrderEvent::StatusUpdated { order, status } => serde_json::to_string(&Frame {
            event: name,
            data: OrderStatusUpdatedData {
                order_id: order.into_uuid(),
                new_status: status.as_str(),
            },
        }),
        OrderEvent::Deleted { orders, deleted } => serde_json::to_string(&Frame {
            event: name,
            data: OrderDeletedData {
                orders: order_list(orders),
                deleted_order_id: deleted.into_uuid(),
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::orders::records::{OrderStatus, OrderUuid};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use crate::test_helpers::make_order;

    use super::*;

    fn decode(event: OrderEvent) -> TestResult<Value> {
        Ok(serde_json::from_str(&encode(event)?)?)
    }

    #[test]
    fn created_frame_carries_new_order_and_list() -> TestResult {
        let order = make_order(OrderUuid::new(), OrderStatus::Pending);
        let frame = decode(OrderEvent::Created {
            order: order.clone(),
            orders: vec![order.clone()],
        })?;

        assert_eq!(frame["event"], "orderCreated");
        assert_eq!(frame["data"]["newOrder"]["id"], json!(order.uuid.into_uuid()));
        assert_eq!(frame["data"]["orders"].as_array().map(Vec::len), Some(1));

        Ok(())
    }

    #[test]
    fn status_frame_carries_id_and_status() -> TestResult {
        let order = OrderUuid::new();
        let frame = decode(OrderEvent::StatusUpdated {
            order,
            status: OrderStatus::Shipped,
        })?;

        assert_eq!(
            frame,
            json!({
                "event": "orderStatusUpdated",
                "data": { "orderId": order.into_uuid(), "newStatus": "Shipped" },
            })
        );

        Ok(())
    }

    #[test]
    fn deleted_frame_carries_remaining_orders() -> TestResult {
        let deleted = OrderUuid::new();
        let frame = decode(OrderEvent::Deleted {
            orders: Vec::new(),
            deleted,
        })?;

        assert_eq!(frame["event"], "orderDeleted");
        assert_eq!(frame["data"]["deletedOrderId"], json!(deleted.into_uuid()));
        assert_eq!(frame["data"]["orders"], json!([]));

        Ok(())
    }
}
