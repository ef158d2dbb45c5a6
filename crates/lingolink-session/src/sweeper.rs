//! Stale state sweeper — purges persisted session artifacts that do
//! not belong to the current identity.
//!
//! The provider SDK and the browser's persistence surfaces cache data
//! keyed loosely, which can leak one account's cached conversation
//! data into the next account's session on the same device. Sweeping
//! on identity change and logout closes that hole.

use std::sync::Arc;

use tracing::debug;

use lingolink_core::types::UserId;

use crate::artifacts;

/// One persistence surface the sweeper can scan and clear
/// (local storage, session storage, the embedded provider cache).
/// The sweeper owns no schema; it only matches keys.
pub trait ArtifactStore: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &str;

    /// Snapshot of all keys currently present.
    fn keys(&self) -> Vec<String>;

    /// Removes a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// Sweeps session artifacts across the injected persistence surfaces.
pub struct StaleStateSweeper {
    stores: Vec<Arc<dyn ArtifactStore>>,
}

impl StaleStateSweeper {
    /// Creates a sweeper over the given surfaces.
    pub fn new(stores: Vec<Arc<dyn ArtifactStore>>) -> Self {
        Self { stores }
    }

    /// Removes every session artifact whose owner is not `current`.
    ///
    /// With `None` (logout), removes all session artifacts
    /// unconditionally. Idempotent; absence of artifacts is not an
    /// error, and keys outside the session namespace are never
    /// touched.
    pub fn sweep(&self, current: Option<UserId>) {
        for store in &self.stores {
            let mut removed = 0usize;
            for key in store.keys() {
                if !artifacts::is_session_artifact(&key) {
                    continue;
                }
                let keep = match current {
                    Some(identity) => artifacts::is_owned_by(&key, identity),
                    None => false,
                };
                if !keep {
                    store.remove(&key);
                    removed += 1;
                }
            }
            if removed > 0 {
                debug!(store = store.name(), removed, "Swept stale session artifacts");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::MemoryArtifactStore;

    use super::*;

    #[test]
    fn test_sweep_keeps_current_identity_artifacts() {
        let store = Arc::new(MemoryArtifactStore::new("local"));
        let current = UserId::new();
        let previous = UserId::new();

        store.insert(artifacts::token_key(current), "keep");
        store.insert(artifacts::token_key(previous), "purge");
        store.insert(artifacts::connection_key(previous), "purge");

        let sweeper = StaleStateSweeper::new(vec![store.clone()]);
        sweeper.sweep(Some(current));

        assert!(store.contains(&artifacts::token_key(current)));
        assert!(!store.contains(&artifacts::token_key(previous)));
        assert!(!store.contains(&artifacts::connection_key(previous)));
    }

    #[test]
    fn test_logout_sweep_removes_everything() {
        let store = Arc::new(MemoryArtifactStore::new("local"));
        store.insert(artifacts::token_key(UserId::new()), "a");
        store.insert(artifacts::conversation_cache_key(UserId::new()), "b");

        let sweeper = StaleStateSweeper::new(vec![store.clone()]);
        sweeper.sweep(None);

        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_unrelated_keys_survive() {
        let store = Arc::new(MemoryArtifactStore::new("local"));
        store.insert("theme-preference".to_string(), "dark");
        store.insert(artifacts::token_key(UserId::new()), "x");

        let sweeper = StaleStateSweeper::new(vec![store.clone()]);
        sweeper.sweep(None);

        assert!(store.contains("theme-preference"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let store = Arc::new(MemoryArtifactStore::new("session"));
        store.insert(artifacts::token_key(UserId::new()), "x");

        let sweeper = StaleStateSweeper::new(vec![store.clone()]);
        sweeper.sweep(None);
        sweeper.sweep(None);

        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_sweep_covers_all_surfaces() {
        let local = Arc::new(MemoryArtifactStore::new("local"));
        let session = Arc::new(MemoryArtifactStore::new("session"));
        let previous = UserId::new();
        local.insert(artifacts::token_key(previous), "x");
        session.insert(artifacts::connection_key(previous), "y");

        let sweeper = StaleStateSweeper::new(vec![local.clone(), session.clone()]);
        sweeper.sweep(Some(UserId::new()));

        assert_eq!(local.len(), 0);
        assert_eq!(session.len(), 0);
    }
}
