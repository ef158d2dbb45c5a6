//! # lingolink-auth
//!
//! Token plumbing for the chat token endpoint: verification of the
//! HTTP-only session cookie and issuing of short-lived provider tokens
//! for the real-time messaging SDK.
//!
//! Authentication business rules (signup, login, lockout) live in the
//! account service and are out of scope here.

pub mod claims;
pub mod issuer;
pub mod verifier;

pub use issuer::ProviderTokenIssuer;
pub use verifier::SessionVerifier;
