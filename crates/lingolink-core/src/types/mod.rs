//! Domain types shared across LingoLink crates.

pub mod conversation;
pub mod id;

pub use conversation::ConversationId;
pub use id::{ConnectionId, UserId};
