//! Session state machine vocabulary and the live session aggregate.

use std::fmt;

use serde::{Deserialize, Serialize};

use lingolink_core::types::ConversationId;

use crate::provider::ProviderConnection;
use crate::token::SessionToken;

/// States of the session coordinator.
///
/// Normal flow: `Idle → TokenFetching → Connecting →
/// ConversationJoining → Live → Disconnecting → Idle`. `Failed` is
/// reachable from the three middle states and is terminal for that
/// attempt only; a fresh open restarts from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session activity.
    Idle,
    /// Acquiring a token from the broker.
    TokenFetching,
    /// Establishing the live provider connection.
    Connecting,
    /// Binding the conversation over the new connection.
    ConversationJoining,
    /// Session usable; conversation exposed to the UI layer.
    Live,
    /// Tearing down connection and persisted artifacts.
    Disconnecting,
    /// The attempt failed; waiting for a user-triggered retry.
    Failed,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

impl SessionState {
    /// Stable string form for logging and wire use.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::TokenFetching => "token_fetching",
            Self::Connecting => "connecting",
            Self::ConversationJoining => "conversation_joining",
            Self::Live => "live",
            Self::Disconnecting => "disconnecting",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The client-side aggregate of one live chat session: credential,
/// provider connection, and bound conversation.
///
/// Exactly one may be live per browser context; ownership is exclusive
/// and sequential, never concurrent.
#[derive(Debug, Clone)]
pub struct ChatSession {
    /// The token the connection was opened with.
    pub token: SessionToken,
    /// The live provider connection.
    pub connection: ProviderConnection,
    /// The conversation bound to this session.
    pub conversation: ConversationId,
}
