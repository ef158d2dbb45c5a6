//! Application state shared across all handlers.

use std::sync::Arc;

use lingolink_auth::issuer::ProviderTokenIssuer;
use lingolink_auth::verifier::SessionVerifier;
use lingolink_core::config::AppConfig;
use lingolink_presence::gateway::GatewayEngine;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Gateway engine driving the presence registry.
    pub gateway: Arc<GatewayEngine>,
    /// Session cookie verifier.
    pub verifier: Arc<SessionVerifier>,
    /// Provider token issuer.
    pub issuer: Arc<ProviderTokenIssuer>,
}

impl AppState {
    /// Builds the state from configuration.
    pub fn new(config: AppConfig) -> Self {
        let verifier = Arc::new(SessionVerifier::new(&config.auth));
        let issuer = Arc::new(ProviderTokenIssuer::new(&config.auth));
        Self {
            config: Arc::new(config),
            gateway: Arc::new(GatewayEngine::new()),
            verifier,
            issuer,
        }
    }
}
