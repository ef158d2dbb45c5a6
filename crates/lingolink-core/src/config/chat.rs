//! Chat session coordination configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the client-side session coordinator and token broker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Ordered list of token issuing endpoints, tried in sequence.
    /// The first entry is the primary backend, later entries are
    /// fallbacks with an identical contract.
    #[serde(default = "default_token_sources")]
    pub token_sources: Vec<String>,
    /// Seconds after which a previously fetched token is no longer
    /// reused for a new connect attempt.
    #[serde(default = "default_token_freshness")]
    pub token_freshness_seconds: u64,
    /// Per-source timeout for a token fetch, in seconds.
    #[serde(default = "default_token_fetch_timeout")]
    pub token_fetch_timeout_seconds: u64,
    /// Timeout for establishing the live provider connection, in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

impl ChatConfig {
    /// Token freshness window as a [`Duration`].
    pub fn token_freshness(&self) -> Duration {
        Duration::from_secs(self.token_freshness_seconds)
    }

    /// Per-source token fetch timeout as a [`Duration`].
    pub fn token_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.token_fetch_timeout_seconds)
    }

    /// Connection establishment timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            token_sources: default_token_sources(),
            token_freshness_seconds: default_token_freshness(),
            token_fetch_timeout_seconds: default_token_fetch_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

fn default_token_sources() -> Vec<String> {
    vec![
        "http://localhost:5002/api".to_string(),
        "http://localhost:5001/api".to_string(),
    ]
}

fn default_token_freshness() -> u64 {
    300
}

fn default_token_fetch_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    15
}
