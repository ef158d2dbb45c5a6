//! In-memory fakes for the coordinator's collaborators.
//!
//! Shared between this crate's unit tests and the workspace
//! integration tests, so it ships as a regular module.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use lingolink_core::error::AppError;
use lingolink_core::result::AppResult;
use lingolink_core::types::{ConversationId, UserId};

use crate::broker::TokenSource;
use crate::provider::{ChatProvider, ProviderConnection};
use crate::sweeper::ArtifactStore;
use crate::token::SessionToken;

/// Scripted token source.
pub struct StubTokenSource {
    name: String,
    fail: bool,
    pre_aged_seconds: i64,
    gate: Option<Arc<Notify>>,
    issued: AtomicUsize,
}

impl StubTokenSource {
    /// Source that always succeeds with `tok-{name}-{identity}`.
    pub fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fail: false,
            pre_aged_seconds: 0,
            gate: None,
            issued: AtomicUsize::new(0),
        }
    }

    /// Source that always fails.
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            fail: true,
            ..Self::ok(name)
        }
    }

    /// Source that blocks until [`release`](Self::release) is called.
    pub fn gated(name: impl Into<String>) -> Self {
        Self {
            gate: Some(Arc::new(Notify::new())),
            ..Self::ok(name)
        }
    }

    /// Source whose tokens are already `seconds` old when issued.
    pub fn pre_aged(name: impl Into<String>, seconds: i64) -> Self {
        Self {
            pre_aged_seconds: seconds,
            ..Self::ok(name)
        }
    }

    /// Releases one pending (or future) gated issue call.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// How many times `issue` was called.
    pub fn issue_count(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenSource for StubTokenSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn issue(&self, identity: UserId) -> AppResult<SessionToken> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.issued.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::token_unavailable(format!(
                "{}: scripted failure",
                self.name
            )));
        }
        let issued_at = chrono::Utc::now() - chrono::Duration::seconds(self.pre_aged_seconds);
        Ok(SessionToken::with_issued_at(
            format!("tok-{}-{identity}", self.name),
            identity,
            issued_at,
        ))
    }
}

/// In-memory key/value persistence surface.
pub struct MemoryArtifactStore {
    name: String,
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryArtifactStore {
    /// Creates an empty store.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Inserts an artifact.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.into(), value.into());
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn keys(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

/// Recording fake of the provider SDK.
///
/// Tracks open connections by scope (mimicking the SDK's
/// library-global instance table) plus call counters for assertions.
#[derive(Default)]
pub struct RecordingProvider {
    open: Mutex<Vec<ProviderConnection>>,
    joins: Mutex<Vec<(ConversationId, Vec<UserId>)>>,
    tokens_used: Mutex<Vec<String>>,
    connects: AtomicUsize,
    disconnects: AtomicUsize,
    max_open: AtomicUsize,
    fail_connect: AtomicBool,
    fail_join: AtomicBool,
    fail_disconnect: AtomicBool,
}

impl RecordingProvider {
    /// Creates a fake provider with no scripted failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next connect calls to fail.
    pub fn fail_connect(&self, fail: bool) {
        self.fail_connect.store(fail, Ordering::SeqCst);
    }

    /// Scripts the next join calls to fail.
    pub fn fail_join(&self, fail: bool) {
        self.fail_join.store(fail, Ordering::SeqCst);
    }

    /// Scripts the next disconnect calls to fail.
    pub fn fail_disconnect(&self, fail: bool) {
        self.fail_disconnect.store(fail, Ordering::SeqCst);
    }

    /// Plants a connection as if opened by an earlier coordinator
    /// instance under `identity`'s credential.
    pub fn seed_connection(&self, identity: UserId) -> ProviderConnection {
        let conn = ProviderConnection::new(identity);
        let mut open = self.open.lock().unwrap();
        open.push(conn.clone());
        self.max_open.fetch_max(open.len(), Ordering::SeqCst);
        conn
    }

    /// Number of currently open connections.
    pub fn open_count(&self) -> usize {
        self.open.lock().unwrap().len()
    }

    /// Highest number of simultaneously open connections observed.
    pub fn max_open(&self) -> usize {
        self.max_open.load(Ordering::SeqCst)
    }

    /// Total connect calls.
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Total disconnect calls.
    pub fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }

    /// Token strings passed to connect, in order.
    pub fn tokens_used(&self) -> Vec<String> {
        self.tokens_used.lock().unwrap().clone()
    }

    /// Conversations joined, in order.
    pub fn joined(&self) -> Vec<(ConversationId, Vec<UserId>)> {
        self.joins.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for RecordingProvider {
    async fn connect(
        &self,
        identity: UserId,
        token: &SessionToken,
    ) -> AppResult<ProviderConnection> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.tokens_used
            .lock()
            .unwrap()
            .push(token.value().to_string());

        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(AppError::connection_failed("scripted connect failure"));
        }

        let conn = ProviderConnection::new(identity);
        let mut open = self.open.lock().unwrap();
        open.push(conn.clone());
        self.max_open.fetch_max(open.len(), Ordering::SeqCst);
        Ok(conn)
    }

    async fn disconnect(&self, connection: &ProviderConnection) -> AppResult<()> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        if self.fail_disconnect.load(Ordering::SeqCst) {
            return Err(AppError::internal("scripted disconnect failure"));
        }
        self.open.lock().unwrap().retain(|c| c.id != connection.id);
        Ok(())
    }

    async fn join_conversation(
        &self,
        _connection: &ProviderConnection,
        conversation: &ConversationId,
        participants: &[UserId],
    ) -> AppResult<()> {
        if self.fail_join.load(Ordering::SeqCst) {
            return Err(AppError::conversation_join_failed("scripted join failure"));
        }
        self.joins
            .lock()
            .unwrap()
            .push((conversation.clone(), participants.to_vec()));
        Ok(())
    }

    async fn open_connections(&self, scope: &str) -> Vec<ProviderConnection> {
        self.open
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.scope == scope)
            .cloned()
            .collect()
    }
}
