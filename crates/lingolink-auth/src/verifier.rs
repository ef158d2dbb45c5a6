//! Session cookie JWT validation.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use lingolink_core::config::auth::AuthConfig;
use lingolink_core::error::AppError;
use lingolink_core::types::UserId;

use crate::claims::SessionClaims;

/// Validates the session JWT carried by the HTTP-only login cookie.
#[derive(Clone)]
pub struct SessionVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl SessionVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(config.session_jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies a session token and returns the authenticated user ID.
    pub fn verify(&self, token: &str) -> Result<UserId, AppError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::authentication(format!("Invalid session token: {e}")))?;

        Ok(UserId::from_uuid(data.claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    use lingolink_core::error::ErrorKind;

    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            session_jwt_secret: "test-session-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    fn sign_session(user: Uuid, exp_offset_secs: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user,
            iat: now,
            exp: now + exp_offset_secs,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-session-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_cookie_yields_user_id() {
        let verifier = SessionVerifier::new(&test_config());
        let user = Uuid::new_v4();

        let id = verifier.verify(&sign_session(user, 3600)).unwrap();
        assert_eq!(id.into_uuid(), user);
    }

    #[test]
    fn test_expired_cookie_is_rejected() {
        let verifier = SessionVerifier::new(&test_config());

        let err = verifier
            .verify(&sign_session(Uuid::new_v4(), -3600))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_garbage_cookie_is_rejected() {
        let verifier = SessionVerifier::new(&test_config());
        assert!(verifier.verify("not-a-jwt").is_err());
    }
}
