//! Session tokens issued by the chat backends.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lingolink_core::types::UserId;

/// A short-lived credential scoped to one user.
///
/// The token has an implicit freshness window: once older than the
/// configured interval it is no longer reused for a new connect
/// attempt and is re-fetched on next use instead. The broker never
/// caches tokens; freshness is the coordinator's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// The opaque token string handed to the provider SDK.
    value: String,
    /// The identity this token is scoped to.
    identity: UserId,
    /// When the token was obtained from an issuing source.
    issued_at: DateTime<Utc>,
}

impl SessionToken {
    /// Creates a token obtained just now.
    pub fn new(value: impl Into<String>, identity: UserId) -> Self {
        Self::with_issued_at(value, identity, Utc::now())
    }

    /// Creates a token with an explicit issue instant.
    pub fn with_issued_at(
        value: impl Into<String>,
        identity: UserId,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            value: value.into(),
            identity,
            issued_at,
        }
    }

    /// The raw token string.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The identity this token is scoped to.
    pub fn identity(&self) -> UserId {
        self.identity
    }

    /// When the token was obtained.
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Whether this token is too old to reuse for a new connect.
    pub fn is_stale(&self, freshness_window: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.issued_at);
        age >= chrono::Duration::from_std(freshness_window).unwrap_or(chrono::Duration::MAX)
    }
}
