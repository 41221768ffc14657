//! Order event broadcasting to WebSocket clients.

mod events;
mod notifier;
mod registry;
pub(crate) mod socket;

pub(crate) use notifier::SocketNotifier;
pub(crate) use registry::ConnectionRegistry;
