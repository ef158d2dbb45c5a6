//! Artifact key builders for persisted session state.
//!
//! Centralising key construction prevents typos and gives the sweeper
//! one place to recognize session artifacts by prefix and owner.

use lingolink_core::types::UserId;

/// Prefix applied to all persisted session artifact keys.
const PREFIX: &str = "lingolink-chat";

/// Key for a cached session token.
pub fn token_key(identity: UserId) -> String {
    format!("{PREFIX}:token:{identity}")
}

/// Key for cached connection metadata.
pub fn connection_key(identity: UserId) -> String {
    format!("{PREFIX}:connection:{identity}")
}

/// Key for the provider SDK's cached conversation data.
pub fn conversation_cache_key(identity: UserId) -> String {
    format!("{PREFIX}:conversations:{identity}")
}

/// Whether a persisted key is a session artifact at all.
///
/// Keys outside this namespace belong to other features and are never
/// touched by the sweeper.
pub fn is_session_artifact(key: &str) -> bool {
    key.starts_with(PREFIX)
}

/// Whether a session artifact key belongs to the given identity.
///
/// Matches by content because the provider SDK keys some artifacts
/// loosely (a library-global scope with the user ID embedded) rather
/// than by a strict schema.
pub fn is_owned_by(key: &str, identity: UserId) -> bool {
    key.contains(&identity.to_string())
}
