//! Deterministic conversation identifiers.
//!
//! Both participants derive the same conversation ID locally from the
//! sorted pair of their user IDs, so no negotiation step is needed to
//! converge on a shared conversation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Identifier for the provider-side conversation between a fixed pair
/// of participants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Derives the conversation ID for two participants.
    ///
    /// Commutative: `between(a, b) == between(b, a)`. The form is
    /// `"{min}-{max}"` over the participant UUIDs.
    pub fn between(a: UserId, b: UserId) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self(format!("{lo}-{hi}"))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
