//! Session coordinator — owns the lifecycle of the single chat
//! session per browser context.
//!
//! The coordinator is a state machine (`Idle → TokenFetching →
//! Connecting → ConversationJoining → Live → Disconnecting → Idle`)
//! whose async steps are suspension points: a logout, identity switch,
//! or unmount may interleave with any of them. Every suspension point
//! re-validates the attempt epoch before committing its result, and a
//! result that arrives after a newer event is discarded, never
//! applied. There is no true cancellation of in-flight calls; the
//! epoch distinguishes the current attempt from superseded ones.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use lingolink_core::config::chat::ChatConfig;
use lingolink_core::error::AppError;
use lingolink_core::result::AppResult;
use lingolink_core::types::{ConversationId, UserId};

use crate::broker::TokenBroker;
use crate::provider::ChatProvider;
use crate::session::{ChatSession, SessionState};
use crate::sweeper::StaleStateSweeper;
use crate::token::SessionToken;

/// Mutable coordinator state. Never held across a provider or network
/// await.
#[derive(Debug, Default)]
struct Inner {
    state: SessionState,
    session: Option<ChatSession>,
    cached_token: Option<SessionToken>,
}

/// Client-side owner of the single live chat session.
pub struct SessionCoordinator {
    broker: TokenBroker,
    provider: Arc<dyn ChatProvider>,
    sweeper: StaleStateSweeper,
    freshness_window: Duration,
    connect_timeout: Duration,
    /// Attempt epoch. Bumped by every open/reset/logout; an attempt
    /// whose epoch is no longer current discards its results.
    epoch: AtomicU64,
    inner: Mutex<Inner>,
}

impl SessionCoordinator {
    /// Creates a coordinator over the injected collaborators.
    pub fn new(
        config: &ChatConfig,
        broker: TokenBroker,
        provider: Arc<dyn ChatProvider>,
        sweeper: StaleStateSweeper,
    ) -> Self {
        Self {
            broker,
            provider,
            sweeper,
            freshness_window: config.token_freshness(),
            connect_timeout: config.connect_timeout(),
            epoch: AtomicU64::new(0),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Current state of the state machine.
    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state
    }

    /// The live session, if any.
    pub async fn current_session(&self) -> Option<ChatSession> {
        self.inner.lock().await.session.clone()
    }

    /// Opens a session between `identity` and `peer`.
    ///
    /// Any previously live session for this context is fully torn down
    /// first; teardown always runs to completion before the new
    /// connect starts. On success the session is `Live` and the bound
    /// conversation is returned for the UI layer.
    pub async fn open(&self, identity: UserId, peer: UserId) -> AppResult<ChatSession> {
        let attempt = self.begin_attempt();

        self.teardown(Some(identity)).await;
        self.ensure_current(attempt)?;

        // ── Token ────────────────────────────────────────────────
        self.set_state_if_current(attempt, SessionState::TokenFetching)
            .await;
        let token = self.acquire_token(attempt, identity).await?;

        // ── Connect ──────────────────────────────────────────────
        // Last line of defense against duplicate live connections:
        // anything still open under this credential scope (a prior,
        // already-dropped coordinator instance included) is closed
        // before a new connection may be opened.
        self.force_close_scope(&identity.to_string()).await;
        self.ensure_current(attempt)?;
        self.set_state_if_current(attempt, SessionState::Connecting)
            .await;

        let connect = self.provider.connect(identity, &token);
        let connection = match tokio::time::timeout(self.connect_timeout, connect).await {
            Ok(Ok(connection)) => connection,
            Ok(Err(e)) => {
                self.set_state_if_current(attempt, SessionState::Failed).await;
                return Err(e);
            }
            Err(_) => {
                self.set_state_if_current(attempt, SessionState::Failed).await;
                return Err(AppError::connection_failed(format!(
                    "Connect timed out after {:?}",
                    self.connect_timeout
                )));
            }
        };

        if !self.is_current(attempt) {
            // The connection opened after a newer event; it must not
            // survive as a second live connection.
            self.close_quietly(&connection).await;
            return Err(AppError::superseded("Connect overtaken by a newer event"));
        }

        // ── Join ─────────────────────────────────────────────────
        self.set_state_if_current(attempt, SessionState::ConversationJoining)
            .await;
        let conversation = ConversationId::between(identity, peer);
        let participants = [identity, peer];

        if let Err(e) = self
            .provider
            .join_conversation(&connection, &conversation, &participants)
            .await
        {
            // Fatal for the attempt: the connection is closed and the
            // machine returns to Idle.
            self.close_quietly(&connection).await;
            self.set_state_if_current(attempt, SessionState::Idle).await;
            return Err(e);
        }

        // ── Commit ───────────────────────────────────────────────
        let mut inner = self.inner.lock().await;
        if !self.is_current(attempt) {
            drop(inner);
            self.close_quietly(&connection).await;
            return Err(AppError::superseded("Join overtaken by a newer event"));
        }

        let session = ChatSession {
            token,
            connection,
            conversation: conversation.clone(),
        };
        inner.session = Some(session.clone());
        inner.state = SessionState::Live;

        info!(
            user_id = %identity,
            peer_id = %peer,
            conversation = %conversation,
            "Chat session live"
        );
        Ok(session)
    }

    /// Reacts to an identity change or coordinator unmount: supersedes
    /// any in-flight attempt and tears the session down, keeping only
    /// artifacts owned by `current`.
    pub async fn reset(&self, current: Option<UserId>) {
        self.begin_attempt();
        self.teardown(current).await;
    }

    /// Explicit logout: supersedes any in-flight attempt, tears the
    /// session down, and purges all persisted session artifacts.
    pub async fn logout(&self) {
        self.reset(None).await;
    }

    /// Acquires a usable token, reusing the cached one only when it is
    /// scoped to `identity` and still inside the freshness window.
    async fn acquire_token(&self, attempt: u64, identity: UserId) -> AppResult<SessionToken> {
        let cached = self.inner.lock().await.cached_token.clone();
        if let Some(token) = cached {
            if token.identity() == identity && !token.is_stale(self.freshness_window) {
                debug!(user_id = %identity, "Reusing fresh cached token");
                return Ok(token);
            }
        }

        let token = match self.broker.fetch_token(identity).await {
            Ok(token) => token,
            Err(e) => {
                self.set_state_if_current(attempt, SessionState::Failed).await;
                return Err(e);
            }
        };

        // The fetch may have resolved after an identity switch or
        // logout; a stale token must never feed a connect.
        if !self.is_current(attempt) {
            return Err(AppError::superseded(
                "Token fetch overtaken by a newer event",
            ));
        }

        self.inner.lock().await.cached_token = Some(token.clone());
        Ok(token)
    }

    /// Tears down the current session and persisted state.
    ///
    /// Idempotent and infallible from the caller's point of view:
    /// close failures and sweep anomalies are logged and swallowed so
    /// teardown always completes and never blocks a new session.
    async fn teardown(&self, keep: Option<UserId>) {
        let session = {
            let mut inner = self.inner.lock().await;
            inner.state = SessionState::Disconnecting;
            let cached_matches = match (&inner.cached_token, keep) {
                (Some(token), Some(identity)) => token.identity() == identity,
                _ => false,
            };
            if !cached_matches {
                inner.cached_token = None;
            }
            inner.session.take()
        };

        let mut scopes: Vec<String> = Vec::new();
        if let Some(session) = session {
            scopes.push(session.connection.scope.clone());
            if let Err(e) = self.provider.disconnect(&session.connection).await {
                warn!(
                    conn_id = %session.connection.id,
                    error = %e,
                    "Teardown: closing live connection failed, continuing"
                );
            }
        }
        if let Some(identity) = keep {
            scopes.push(identity.to_string());
        }
        scopes.dedup();
        for scope in scopes {
            self.force_close_scope(&scope).await;
        }

        self.sweeper.sweep(keep);

        self.inner.lock().await.state = SessionState::Idle;
    }

    /// Closes every connection still open under `scope`, best effort.
    async fn force_close_scope(&self, scope: &str) {
        for connection in self.provider.open_connections(scope).await {
            debug!(scope, conn_id = %connection.id, "Force-closing leftover connection");
            self.close_quietly(&connection).await;
        }
    }

    async fn close_quietly(&self, connection: &crate::provider::ProviderConnection) {
        if let Err(e) = self.provider.disconnect(connection).await {
            warn!(conn_id = %connection.id, error = %e, "Close failed, continuing");
        }
    }

    fn begin_attempt(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, attempt: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == attempt
    }

    fn ensure_current(&self, attempt: u64) -> AppResult<()> {
        if self.is_current(attempt) {
            Ok(())
        } else {
            Err(AppError::superseded("Attempt overtaken by a newer event"))
        }
    }

    async fn set_state_if_current(&self, attempt: u64, state: SessionState) {
        let mut inner = self.inner.lock().await;
        if self.is_current(attempt) {
            inner.state = state;
        }
    }
}
