//! HTTP request handlers.

pub mod health;
pub mod token;
pub mod ws;
