//! Gateway engine — drives the presence registry from connection
//! lifecycle events.
//!
//! The transport (WebSocket upgrade, frame pumping) lives in the API
//! layer; this engine only consumes its connect/register/disconnect
//! callbacks. Event handlers never yield mid-mutation, so registry
//! updates stay serialized per connection event.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use lingolink_core::types::ConnectionId;

use crate::handle::GatewayHandle;
use crate::message::{ClientEvent, ServerEvent};
use crate::registry::PresenceRegistry;

/// Buffer size for per-connection outbound frame channels.
const OUTBOUND_BUFFER: usize = 64;

/// Coordinates gateway connections and the presence registry.
#[derive(Debug, Default)]
pub struct GatewayEngine {
    /// Identity → live connection ownership table.
    registry: PresenceRegistry,
}

impl GatewayEngine {
    /// Creates a new gateway engine with an empty registry.
    pub fn new() -> Self {
        Self {
            registry: PresenceRegistry::new(),
        }
    }

    /// Accepts a new transport connection.
    ///
    /// Returns the connection handle and the receiver the transport
    /// drains for outbound frames. The connection stays anonymous
    /// until the client sends its register event.
    pub fn accept(&self) -> (Arc<GatewayHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(OUTBOUND_BUFFER);
        let handle = Arc::new(GatewayHandle::new(tx));
        debug!(conn_id = %handle.id, "Gateway connection accepted");
        (handle, rx)
    }

    /// Processes a raw inbound frame from a connection.
    ///
    /// Malformed frames are answered with an error event and otherwise
    /// ignored; they are never fatal to the connection.
    pub fn handle_frame(&self, handle: &Arc<GatewayHandle>, raw: &str) {
        let event: ClientEvent = match serde_json::from_str(raw) {
            Ok(event) => event,
            Err(e) => {
                warn!(conn_id = %handle.id, error = %e, "Unparseable gateway frame");
                self.push(handle, &ServerEvent::Error {
                    message: format!("Failed to parse event: {e}"),
                });
                return;
            }
        };

        match event {
            ClientEvent::Register { user_id } => {
                self.registry.register(user_id, handle.clone());
                self.push(handle, &ServerEvent::Registered { user_id });
            }
        }
    }

    /// Handles a transport disconnect for the given connection.
    pub fn handle_disconnect(&self, conn_id: ConnectionId) {
        self.registry.unregister(conn_id);
    }

    /// Returns the presence registry for identity lookups.
    pub fn registry(&self) -> &PresenceRegistry {
        &self.registry
    }

    fn push(&self, handle: &Arc<GatewayHandle>, event: &ServerEvent) {
        match serde_json::to_string(event) {
            Ok(frame) => {
                handle.send(frame);
            }
            Err(e) => warn!(conn_id = %handle.id, error = %e, "Failed to serialize event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use lingolink_core::types::UserId;

    use super::*;

    #[test]
    fn test_register_frame_binds_identity() {
        let engine = GatewayEngine::new();
        let (handle, mut rx) = engine.accept();
        let user = UserId::new();

        engine.handle_frame(&handle, &format!(r#"{{"type":"register","user_id":"{user}"}}"#));

        assert_eq!(engine.registry().lookup(user).unwrap().id, handle.id);
        let ack = rx.try_recv().unwrap();
        assert!(ack.contains("registered"));
    }

    #[test]
    fn test_disconnect_clears_presence() {
        let engine = GatewayEngine::new();
        let (handle, _rx) = engine.accept();
        let user = UserId::new();

        engine.handle_frame(&handle, &format!(r#"{{"type":"register","user_id":"{user}"}}"#));
        engine.handle_disconnect(handle.id);

        assert!(engine.registry().lookup(user).is_none());
    }

    #[test]
    fn test_malformed_frame_is_answered_not_fatal() {
        let engine = GatewayEngine::new();
        let (handle, mut rx) = engine.accept();

        engine.handle_frame(&handle, "{not json");

        let reply = rx.try_recv().unwrap();
        assert!(reply.contains("error"));
    }

    #[test]
    fn test_reconnect_before_stale_disconnect() {
        // Client reconnects, then the old connection's disconnect event
        // arrives late. The fresh registration must survive.
        let engine = GatewayEngine::new();
        let user = UserId::new();
        let frame = format!(r#"{{"type":"register","user_id":"{user}"}}"#);

        let (old, _old_rx) = engine.accept();
        engine.handle_frame(&old, &frame);

        let (new, _new_rx) = engine.accept();
        engine.handle_frame(&new, &frame);

        engine.handle_disconnect(old.id);

        assert_eq!(engine.registry().lookup(user).unwrap().id, new.id);
    }
}
