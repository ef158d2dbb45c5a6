//! Token broker — ordered-source token fetching with fallback.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use lingolink_core::config::chat::ChatConfig;
use lingolink_core::error::AppError;
use lingolink_core::result::AppResult;
use lingolink_core::types::UserId;

use crate::token::SessionToken;

/// One token issuing source.
///
/// Sources share an identical contract; the broker only cares about
/// their order. Adding or removing a source is a configuration change.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &str;

    /// Requests a token for `identity` from this source.
    async fn issue(&self, identity: UserId) -> AppResult<SessionToken>;
}

/// Wire shape of the `GET /chat/token` response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// HTTP token source backed by one deployment of the token endpoint.
pub struct HttpTokenSource {
    name: String,
    base_url: String,
    client: reqwest::Client,
}

impl HttpTokenSource {
    /// Creates a source for the endpoint at `base_url`.
    ///
    /// The client carries the browser session cookie jar so the
    /// endpoint can authenticate the request.
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            name: name.into(),
            base_url: base_url.into(),
            client,
        })
    }
}

#[async_trait]
impl TokenSource for HttpTokenSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn issue(&self, identity: UserId) -> AppResult<SessionToken> {
        let url = format!("{}/chat/token", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::token_unavailable(format!("{}: request failed: {e}", self.name)))?
            .error_for_status()
            .map_err(|e| AppError::token_unavailable(format!("{}: {e}", self.name)))?;

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::token_unavailable(format!("{}: bad response body: {e}", self.name)))?;

        Ok(SessionToken::new(body.token, identity))
    }
}

/// Tries an ordered list of token sources, first success wins.
///
/// Each source is tried at most once per call with a bounded timeout;
/// there is no backoff or retry loop. Retrying on a schedule (next
/// session start, focus regain) is the caller's job. The broker holds
/// no token cache.
pub struct TokenBroker {
    sources: Vec<Arc<dyn TokenSource>>,
    fetch_timeout: Duration,
}

impl TokenBroker {
    /// Creates a broker over the given sources.
    pub fn new(sources: Vec<Arc<dyn TokenSource>>, fetch_timeout: Duration) -> Self {
        Self {
            sources,
            fetch_timeout,
        }
    }

    /// Builds HTTP sources from the configured endpoint list.
    pub fn from_config(config: &ChatConfig) -> AppResult<Self> {
        let mut sources: Vec<Arc<dyn TokenSource>> = Vec::with_capacity(config.token_sources.len());
        for (index, base_url) in config.token_sources.iter().enumerate() {
            let name = if index == 0 {
                "primary".to_string()
            } else {
                format!("fallback-{index}")
            };
            sources.push(Arc::new(HttpTokenSource::new(name, base_url.clone())?));
        }
        Ok(Self::new(sources, config.token_fetch_timeout()))
    }

    /// Fetches a token for `identity`.
    ///
    /// Fails with [`ErrorKind::TokenUnavailable`](lingolink_core::ErrorKind::TokenUnavailable)
    /// only after every configured source has failed, carrying the last
    /// source's error text.
    pub async fn fetch_token(&self, identity: UserId) -> AppResult<SessionToken> {
        if self.sources.is_empty() {
            return Err(AppError::configuration("No token sources configured"));
        }

        let mut last_error: Option<AppError> = None;

        for source in &self.sources {
            match tokio::time::timeout(self.fetch_timeout, source.issue(identity)).await {
                Ok(Ok(token)) => {
                    debug!(source = source.name(), user_id = %identity, "Token obtained");
                    return Ok(token);
                }
                Ok(Err(e)) => {
                    warn!(source = source.name(), error = %e, "Token source failed");
                    last_error = Some(e);
                }
                Err(_) => {
                    warn!(source = source.name(), "Token source timed out");
                    last_error = Some(AppError::token_unavailable(format!(
                        "{}: timed out after {:?}",
                        source.name(),
                        self.fetch_timeout
                    )));
                }
            }
        }

        let detail = last_error
            .map(|e| e.message)
            .unwrap_or_else(|| "no sources".to_string());
        Err(AppError::token_unavailable(format!(
            "All {} token sources failed; last error: {detail}",
            self.sources.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use lingolink_core::error::ErrorKind;

    use crate::testing::StubTokenSource;

    use super::*;

    fn broker(sources: Vec<Arc<StubTokenSource>>) -> TokenBroker {
        TokenBroker::new(
            sources
                .into_iter()
                .map(|s| s as Arc<dyn TokenSource>)
                .collect(),
            Duration::from_millis(200),
        )
    }

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let primary = Arc::new(StubTokenSource::ok("primary"));
        let fallback = Arc::new(StubTokenSource::ok("fallback"));
        let broker = broker(vec![primary.clone(), fallback.clone()]);

        let token = broker.fetch_token(UserId::new()).await.unwrap();

        assert!(token.value().starts_with("tok-primary"));
        assert_eq!(primary.issue_count(), 1);
        assert_eq!(fallback.issue_count(), 0);
    }

    #[tokio::test]
    async fn test_primary_failure_falls_back() {
        let primary = Arc::new(StubTokenSource::failing("primary"));
        let fallback = Arc::new(StubTokenSource::ok("fallback"));
        let broker = broker(vec![primary.clone(), fallback.clone()]);

        let token = broker.fetch_token(UserId::new()).await.unwrap();

        assert!(token.value().starts_with("tok-fallback"));
        assert_eq!(primary.issue_count(), 1);
    }

    #[tokio::test]
    async fn test_all_sources_failing_is_token_unavailable() {
        let primary = Arc::new(StubTokenSource::failing("primary"));
        let fallback = Arc::new(StubTokenSource::failing("fallback"));
        let broker = broker(vec![primary.clone(), fallback.clone()]);

        let err = broker.fetch_token(UserId::new()).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::TokenUnavailable);
        // Each source tried exactly once, no retry loop.
        assert_eq!(primary.issue_count(), 1);
        assert_eq!(fallback.issue_count(), 1);
    }

    #[tokio::test]
    async fn test_hanging_source_times_out_into_fallback() {
        // Gated source never released: the broker must time out and
        // move on to the fallback.
        let primary = Arc::new(StubTokenSource::gated("primary"));
        let fallback = Arc::new(StubTokenSource::ok("fallback"));
        let broker = broker(vec![primary, fallback]);

        let token = broker.fetch_token(UserId::new()).await.unwrap();

        assert!(token.value().starts_with("tok-fallback"));
    }

    #[tokio::test]
    async fn test_no_sources_is_configuration_error() {
        let broker = TokenBroker::new(Vec::new(), Duration::from_millis(50));
        let err = broker.fetch_token(UserId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
