//! Order lifecycle events fanned out to connected real-time clients.

use mockall::automock;

use crate::domain::orders::records::{OrderRecord, OrderStatus, OrderUuid};

/// Something that happened to an order, with the data listeners need to
/// refresh without re-fetching.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderEvent {
    Created {
        order: OrderRecord,
        orders: Vec<OrderRecord>,
    },
    StatusUpdated {
        order: OrderUuid,
        status: OrderStatus,
    },
    Deleted {
        orders: Vec<OrderRecord>,
        deleted: OrderUuid,
    },
}

impl OrderEvent {
    /// Wire name of the event.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => "orderCreated",
            Self::StatusUpdated { .. } => "orderStatusUpdated",
            Self::Deleted { .. } => "orderDeleted",
        }
    }
}

/// Publishes order events. Delivery is best effort: publishing never fails
/// and listeners that are not connected miss the event.
#[automock]
pub trait OrderNotifier: Send + Sync {
    fn publish(&self, event: OrderEvent);
}

/// Drops every event. Used when nothing is listening, such as the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl OrderNotifier for SilentNotifier {
    fn publish(&self, event: OrderEvent) {
        tracing::trace!(event = event.name(), "dropping order event");
    }
}
