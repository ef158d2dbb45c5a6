//! Presence registry — which user owns which live connection.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info};

use lingolink_core::types::{ConnectionId, UserId};

use crate::handle::GatewayHandle;

/// In-memory map from logical user identity to the live connection
/// that currently belongs to it.
///
/// Invariant: at most one entry per user at any instant. A new
/// connection for the same user replaces the prior entry; the registry
/// only tracks current ownership and never manages connection
/// teardown. Absence is a normal outcome for every operation, not an
/// error.
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    /// User ID → live connection handle.
    entries: DashMap<UserId, Arc<GatewayHandle>>,
}

impl PresenceRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Inserts or replaces the entry for `identity`.
    ///
    /// An existing mapping under a different handle is discarded
    /// without closing the old connection.
    pub fn register(&self, identity: UserId, handle: Arc<GatewayHandle>) {
        let conn_id = handle.id;
        if let Some(old) = self.entries.insert(identity, handle) {
            if old.id != conn_id {
                debug!(
                    user_id = %identity,
                    old_conn = %old.id,
                    new_conn = %conn_id,
                    "Superseded previous connection for user"
                );
            }
        }
        info!(user_id = %identity, conn_id = %conn_id, "User registered");
    }

    /// Removes the entry whose handle matches `conn_id`.
    ///
    /// Silent no-op when no entry matches: disconnect events routinely
    /// race with entries that were already superseded by a newer
    /// connection.
    pub fn unregister(&self, conn_id: ConnectionId) {
        let owner = self
            .entries
            .iter()
            .find(|entry| entry.value().id == conn_id)
            .map(|entry| *entry.key());

        if let Some(identity) = owner {
            self.entries.remove(&identity);
            info!(user_id = %identity, conn_id = %conn_id, "User disconnected");
        }
    }

    /// Looks up the live connection for `identity`, if any.
    pub fn lookup(&self, identity: UserId) -> Option<Arc<GatewayHandle>> {
        self.entries
            .get(&identity)
            .map(|entry| entry.value().clone())
    }

    /// Returns the number of users with a live connection.
    pub fn online_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    fn handle() -> Arc<GatewayHandle> {
        let (tx, _rx) = mpsc::channel(8);
        Arc::new(GatewayHandle::new(tx))
    }

    #[test]
    fn test_register_then_lookup() {
        let registry = PresenceRegistry::new();
        let user = UserId::new();
        let h = handle();

        registry.register(user, h.clone());

        assert_eq!(registry.lookup(user).unwrap().id, h.id);
        assert_eq!(registry.online_count(), 1);
    }

    #[test]
    fn test_reregister_replaces_not_appends() {
        let registry = PresenceRegistry::new();
        let user = UserId::new();
        let first = handle();
        let second = handle();

        registry.register(user, first);
        registry.register(user, second.clone());

        assert_eq!(registry.online_count(), 1);
        assert_eq!(registry.lookup(user).unwrap().id, second.id);
    }

    #[test]
    fn test_unregister_removes_matching_entry() {
        let registry = PresenceRegistry::new();
        let user = UserId::new();
        let h = handle();

        registry.register(user, h.clone());
        registry.unregister(h.id);

        assert!(registry.lookup(user).is_none());
        assert_eq!(registry.online_count(), 0);
    }

    #[test]
    fn test_unregister_unknown_handle_is_noop() {
        let registry = PresenceRegistry::new();
        let user = UserId::new();
        registry.register(user, handle());

        registry.unregister(ConnectionId::new());

        assert!(registry.lookup(user).is_some());
    }

    #[test]
    fn test_stale_disconnect_does_not_evict_successor() {
        // A disconnect for a connection that was already superseded
        // must leave the successor's entry untouched.
        let registry = PresenceRegistry::new();
        let user = UserId::new();
        let old = handle();
        let new = handle();

        registry.register(user, old.clone());
        registry.register(user, new.clone());
        registry.unregister(old.id);

        assert_eq!(registry.lookup(user).unwrap().id, new.id);
    }
}
