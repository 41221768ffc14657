//! WebSocket endpoint.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use salvo::{
    prelude::*,
    websocket::{Message, WebSocket, WebSocketUpgrade},
};
use tracing::{debug, info, warn};

use crate::{
    extensions::*,
    observability::SocketClientGuard,
    realtime::ConnectionRegistry,
    state::State,
};

/// Upgrade to a WebSocket that receives every order event.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let registry = depot.obtain_or_500::<Arc<State>>()?.realtime.clone();

    WebSocketUpgrade::new()
        .upgrade(req, res, move |ws| serve(ws, registry))
        .await
}

async fn serve(ws: WebSocket, registry: ConnectionRegistry) {
    let (id, mut outbound) = registry.connect();
    let _gauge = SocketClientGuard::track();

    info!(
        connection = id,
        subscribers = registry.subscriber_count(),
        "websocket client connected"
    );

    let (mut sink, mut stream) = ws.split();

    loop {
        tokio::select! {
            frame = outbound.recv() => {
                let Some(frame) = frame else { break };

                if let Err(error) = sink.send(Message::text(frame)).await {
                    debug!(connection = id, "websocket send failed: {error}");
                    break;
                }
            }
            incoming = stream.next() => match incoming {
                Some(Ok(message)) if message.is_close() => break,
                Some(Ok(message)) => {
                    debug!(
                        connection = id,
                        bytes = message.as_bytes().len(),
                        "ignoring client frame"
                    );
                }
                Some(Err(error)) => {
                    warn!(connection = id, "websocket receive failed: {error}");
                    break;
                }
                None => break,
            },
        }
    }

    registry.disconnect(id);

    info!(connection = id, "websocket client disconnected");
}
