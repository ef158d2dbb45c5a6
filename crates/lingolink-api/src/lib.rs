//! # lingolink-api
//!
//! HTTP layer for the LingoLink presence backend built on Axum.
//!
//! Exposes the chat token endpoint consumed by the client's token
//! broker, the WebSocket gateway driving the presence registry, a
//! health probe, and error mapping.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
