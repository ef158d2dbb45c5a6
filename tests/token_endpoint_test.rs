//! Integration tests for the chat token endpoint and health probe.

use axum::body::Body;
use http::{Request, StatusCode};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use lingolink_api::{build_router, AppState};
use lingolink_auth::claims::{ProviderClaims, SessionClaims};
use lingolink_core::config::AppConfig;

const SESSION_SECRET: &str = "test-session-secret";
const PROVIDER_SECRET: &str = "test-provider-secret";

fn test_router() -> axum::Router {
    let mut config = AppConfig::default();
    config.auth.session_jwt_secret = SESSION_SECRET.to_string();
    config.auth.provider_api_secret = PROVIDER_SECRET.to_string();
    build_router(AppState::new(config))
}

fn session_cookie(user: Uuid) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        sub: user,
        iat: now,
        exp: now + 3600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SESSION_SECRET.as_bytes()),
    )
    .unwrap();
    format!("jwt={token}")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_token_without_cookie_is_unauthorized() {
    let router = test_router();

    let response = router
        .oneshot(
            Request::get("/api/chat/token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_with_garbage_cookie_is_unauthorized() {
    let router = test_router();

    let response = router
        .oneshot(
            Request::get("/api/chat/token")
                .header("cookie", "jwt=not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_with_valid_cookie_issues_provider_token() {
    let router = test_router();
    let user = Uuid::new_v4();

    let response = router
        .oneshot(
            Request::get("/api/chat/token")
                .header("cookie", session_cookie(user))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body.get("token").unwrap().as_str().unwrap();

    // The issued token verifies against the provider secret and is
    // scoped to the authenticated user.
    let decoded = decode::<ProviderClaims>(
        token,
        &DecodingKey::from_secret(PROVIDER_SECRET.as_bytes()),
        &Validation::default(),
    )
    .unwrap();
    assert_eq!(decoded.claims.sub, user);
}

#[tokio::test]
async fn test_health_check() {
    let router = test_router();

    let response = router
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.get("status").unwrap().as_str().unwrap(), "ok");
}
