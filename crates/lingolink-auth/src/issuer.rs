//! Provider token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};

use lingolink_core::config::auth::AuthConfig;
use lingolink_core::error::AppError;
use lingolink_core::types::UserId;

use crate::claims::ProviderClaims;

/// Creates signed provider tokens for the real-time messaging SDK.
#[derive(Clone)]
pub struct ProviderTokenIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token TTL in hours.
    ttl_hours: i64,
}

impl std::fmt::Debug for ProviderTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderTokenIssuer")
            .field("ttl_hours", &self.ttl_hours)
            .finish()
    }
}

impl ProviderTokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.provider_api_secret.as_bytes()),
            ttl_hours: config.provider_token_ttl_hours as i64,
        }
    }

    /// Generates a provider token scoped to the given user.
    pub fn issue(&self, user_id: UserId) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = ProviderClaims {
            sub: user_id.into_uuid(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(self.ttl_hours)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode provider token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{decode, DecodingKey, Validation};

    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            provider_api_secret: "test-provider-secret".to_string(),
            provider_token_ttl_hours: 24,
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issued_token_verifies_against_secret() {
        let issuer = ProviderTokenIssuer::new(&test_config());
        let user = UserId::new();

        let token = issuer.issue(user).unwrap();

        let decoded = decode::<ProviderClaims>(
            &token,
            &DecodingKey::from_secret(b"test-provider-secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, user.into_uuid());
        assert!(!decoded.claims.is_expired());
    }

    #[test]
    fn test_token_carries_configured_ttl() {
        let issuer = ProviderTokenIssuer::new(&test_config());
        let token = issuer.issue(UserId::new()).unwrap();

        let decoded = decode::<ProviderClaims>(
            &token,
            &DecodingKey::from_secret(b"test-provider-secret"),
            &Validation::default(),
        )
        .unwrap();

        let ttl = decoded.claims.exp - decoded.claims.iat;
        assert_eq!(ttl, 24 * 3600);
    }
}
