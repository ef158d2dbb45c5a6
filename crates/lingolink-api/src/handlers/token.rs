//! Chat token endpoint.

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::debug;

use lingolink_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body of `GET /chat/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed provider token scoped to the authenticated user.
    pub token: String,
}

/// GET /api/chat/token — issues a provider token for the messaging SDK.
///
/// The caller authenticates via the HTTP-only session cookie set at
/// login. Responds 401 without a valid cookie, 500 if signing fails.
/// The primary and fallback deployments of this endpoint share this
/// handler; the client's token broker treats them as an ordered list.
pub async fn chat_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<TokenResponse>, ApiError> {
    let cookie = jar
        .get(&state.config.auth.session_cookie_name)
        .ok_or_else(|| AppError::authentication("Missing session cookie"))?;

    let user_id = state.verifier.verify(cookie.value())?;
    let token = state.issuer.issue(user_id)?;

    debug!(user_id = %user_id, "Issued provider token");
    Ok(Json(TokenResponse { token }))
}
