//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Credential configuration for the token endpoint.
///
/// The session secret verifies the HTTP-only login cookie; the provider
/// secret signs the short-lived tokens handed to the real-time
/// messaging provider's SDK.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session cookie JWT verification (HMAC-SHA256).
    #[serde(default = "default_session_secret")]
    pub session_jwt_secret: String,
    /// Name of the HTTP-only cookie carrying the session JWT.
    #[serde(default = "default_cookie_name")]
    pub session_cookie_name: String,
    /// Secret key for provider token signing (HMAC-SHA256).
    #[serde(default = "default_provider_secret")]
    pub provider_api_secret: String,
    /// Provider token TTL in hours.
    #[serde(default = "default_provider_ttl")]
    pub provider_token_ttl_hours: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_jwt_secret: default_session_secret(),
            session_cookie_name: default_cookie_name(),
            provider_api_secret: default_provider_secret(),
            provider_token_ttl_hours: default_provider_ttl(),
        }
    }
}

fn default_session_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_cookie_name() -> String {
    "jwt".to_string()
}

fn default_provider_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_provider_ttl() -> u64 {
    24
}
