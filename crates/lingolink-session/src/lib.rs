//! # lingolink-session
//!
//! Client-side session lifecycle coordination for LingoLink chat:
//!
//! - Token brokering across an ordered list of issuing backends with
//!   primary/fallback semantics
//! - A session coordinator guaranteeing at most one live messaging
//!   session per browser context, with epoch-guarded suspension points
//!   and deterministic teardown
//! - A stale state sweeper purging persisted session artifacts that do
//!   not belong to the current identity
//!
//! The real-time messaging provider itself (transport, message
//! persistence) is an external collaborator reached through the
//! [`ChatProvider`] capability trait.

pub mod artifacts;
pub mod broker;
pub mod coordinator;
pub mod provider;
pub mod session;
pub mod sweeper;
pub mod testing;
pub mod token;

pub use broker::{HttpTokenSource, TokenBroker, TokenSource};
pub use coordinator::SessionCoordinator;
pub use provider::{ChatProvider, ProviderConnection};
pub use session::{ChatSession, SessionState};
pub use sweeper::{ArtifactStore, StaleStateSweeper};
pub use token::SessionToken;
