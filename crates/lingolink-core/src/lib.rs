//! # lingolink-core
//!
//! Shared foundations for LingoLink: configuration schemas, the
//! unified application error type, and domain identifier newtypes.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
