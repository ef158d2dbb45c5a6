//! Individual gateway connection handle.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use lingolink_core::types::ConnectionId;

/// A handle to a single live gateway connection.
///
/// Holds the sender channel for pushing frames to the client plus
/// connection metadata. The handle does not know which user owns it;
/// ownership is tracked by the [`PresenceRegistry`](crate::registry::PresenceRegistry)
/// once the client sends its register event.
#[derive(Debug)]
pub struct GatewayHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// Sender for outbound frames.
    sender: mpsc::Sender<String>,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
}

impl GatewayHandle {
    /// Creates a new handle around an outbound frame sender.
    pub fn new(sender: mpsc::Sender<String>) -> Self {
        Self {
            id: ConnectionId::new(),
            sender,
            connected_at: Utc::now(),
        }
    }

    /// Pushes a frame to this connection.
    ///
    /// Returns `false` when the frame was dropped, either because the
    /// send buffer is full or the receiving side has gone away.
    pub fn send(&self, frame: String) -> bool {
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Send buffer full, dropping frame");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }
}
