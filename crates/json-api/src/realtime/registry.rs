//! Connected WebSocket subscribers.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use dashmap::DashMap;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

pub(crate) type ConnectionId = u64;

/// Every live subscriber and its outbound frame queue. Cloning shares the
/// same set of connections.
#[derive(Debug, Clone, Default)]
pub(crate) struct ConnectionRegistry {
    connections: Arc<DashMap<ConnectionId, UnboundedSender<String>>>,
    next_id: Arc<AtomicU64>,
}

impl ConnectionRegistry {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber, returning its id and the queue to drain into
    /// the socket.
    pub(crate) fn connect(&self) -> (ConnectionId, UnboundedReceiver<String>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();

        self.connections.insert(id, tx);

        (id, rx)
    }

    pub(crate) fn disconnect(&self, id: ConnectionId) {
        self.connections.remove(&id);
    }

    /// Queue `frame` for every subscriber, dropping any whose receiver has
    /// gone away. Returns the number of subscribers reached.
    pub(crate) fn broadcast(&self, frame: &str) -> usize {
        let mut closed = Vec::new();
        let mut delivered = 0;

        for entry in self.connections.iter() {
            if entry.value().send(frame.to_owned()).is_ok() {
                delivered += 1;
            } else {
                closed.push(*entry.key());
            }
        }

        for id in closed {
            debug!(connection = id, "pruning closed subscriber");
            self.connections.remove(&id);
        }

        delivered
    }

    #[must_use]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_reaches_every_subscriber() {
        let registry = ConnectionRegistry::new();
        let (_first, mut first_rx) = registry.connect();
        let (_second, mut second_rx) = registry.connect();

        assert_eq!(registry.broadcast("hello"), 2);
        assert_eq!(first_rx.try_recv().ok().as_deref(), Some("hello"));
        assert_eq!(second_rx.try_recv().ok().as_deref(), Some("hello"));
    }

    #[test]
    fn closed_subscribers_are_pruned_on_broadcast() {
        let registry = ConnectionRegistry::new();
        let (_kept, _kept_rx) = registry.connect();
        let (_gone, gone_rx) = registry.connect();

        drop(gone_rx);

        assert_eq!(registry.broadcast("hello"), 1);
        assert_eq!(registry.subscriber_count(), 1);
    }

    #[test]
    fn disconnect_removes_subscriber() {
        let registry = ConnectionRegistry::new();
        let (id, mut rx) = registry.connect();

        registry.disconnect(id);

        assert_eq!(registry.broadcast("hello"), 0);
        assert!(rx.try_recv().is_err(), "disconnected queue received a frame");
    }

    #[test]
    fn clones_share_connections() {
        let registry = ConnectionRegistry::new();
        let (_id, _rx) = registry.connect();

        assert_eq!(registry.clone().subscriber_count(), 1);
    }
}
