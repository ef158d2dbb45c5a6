//! Gateway wire events.

use serde::{Deserialize, Serialize};

use lingolink_core::types::UserId;

/// Events a client may send over the gateway channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Binds this connection to the sending user's identity.
    Register {
        /// The identity claiming the connection.
        user_id: UserId,
    },
}

/// Events the gateway pushes to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Acknowledges a successful register event.
    Registered {
        /// The identity now bound to this connection.
        user_id: UserId,
    },
    /// Reports a malformed or unprocessable client event.
    Error {
        /// Human-readable description.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_event_wire_shape() {
        let user = UserId::new();
        let raw = format!(r#"{{"type":"register","user_id":"{user}"}}"#);

        let event: ClientEvent = serde_json::from_str(&raw).unwrap();
        let ClientEvent::Register { user_id } = event;
        assert_eq!(user_id, user);
    }

    #[test]
    fn test_unknown_event_fails_to_parse() {
        let result: Result<ClientEvent, _> =
            serde_json::from_str(r#"{"type":"teleport","user_id":"x"}"#);
        assert!(result.is_err());
    }
}
