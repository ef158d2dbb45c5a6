//! # lingolink-presence
//!
//! Server-side presence layer: a registry mapping logical user
//! identity to the live connection that currently belongs to it, and a
//! gateway engine that drives the registry from connection lifecycle
//! events.
//!
//! The registry is a plain in-memory lookup table. It is rebuilt from
//! scratch on process restart; durability is not a goal.

pub mod gateway;
pub mod handle;
pub mod message;
pub mod registry;

pub use gateway::GatewayEngine;
pub use handle::GatewayHandle;
pub use registry::PresenceRegistry;
