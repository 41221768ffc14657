//! Order notifier backed by the WebSocket registry.

use bazaar_app::notifications::{OrderEvent, OrderNotifier};
use tracing::{debug, error};

use crate::{
    observability::record_order_event,
    realtime::{ConnectionRegistry, events::encode},
};

/// Sends every order event to every connected client.
#[derive(Debug, Clone)]
pub(crate) struct SocketNotifier {
    registry: ConnectionRegistry,
}

impl SocketNotifier {
    pub(crate) fn new(registry: ConnectionRegistry) -> Self {
        Self { registry }
    }
}

impl OrderNotifier for SocketNotifier {
    fn publish(&self, event: OrderEvent) {
        let name = event.name();

        record_order_event(name);

        match encode(event) {
            Ok(frame) => {
                let delivered = self.registry.broadcast(&frame);

                debug!(event = name, delivered, "order event published");
            }
            Err(error) => error!(event = name, "failed to encode order event: {error}"),
        }
    }
}
