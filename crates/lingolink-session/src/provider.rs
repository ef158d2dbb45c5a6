//! Capability trait for the real-time messaging provider SDK.

use async_trait::async_trait;

use lingolink_core::result::AppResult;
use lingolink_core::types::{ConnectionId, ConversationId, UserId};

use crate::token::SessionToken;

/// Opaque handle to one live provider connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConnection {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// Scope of the credential that opened this connection.
    ///
    /// The coordinator reconciles leftover connections by this scope
    /// rather than by in-memory reference, so connections opened by an
    /// earlier, already-dropped coordinator instance are still found.
    pub scope: String,
}

impl ProviderConnection {
    /// Creates a handle for a connection opened under `identity`'s
    /// credential.
    pub fn new(identity: UserId) -> Self {
        Self {
            id: ConnectionId::new(),
            scope: identity.to_string(),
        }
    }
}

/// The messaging provider's client SDK, reduced to the capabilities
/// the coordinator needs.
///
/// Message transport and persistence stay on the provider's side of
/// this seam. The `open_connections` capability abstracts the SDK's
/// library-global instance tracking so forced cleanup can be faked in
/// tests instead of reaching into a third-party global.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Establishes a live connection for `identity` using `token`.
    async fn connect(&self, identity: UserId, token: &SessionToken)
        -> AppResult<ProviderConnection>;

    /// Closes a live connection. Closing an already-closed connection
    /// is a no-op.
    async fn disconnect(&self, connection: &ProviderConnection) -> AppResult<()>;

    /// Joins (creating if needed) the conversation for the given
    /// participants over an established connection.
    async fn join_conversation(
        &self,
        connection: &ProviderConnection,
        conversation: &ConversationId,
        participants: &[UserId],
    ) -> AppResult<()>;

    /// Enumerates connections currently open under the given credential
    /// scope, wherever they were opened.
    async fn open_connections(&self, scope: &str) -> Vec<ProviderConnection>;
}
