//! End-to-end session lifecycle scenario against faked collaborators.

use std::sync::Arc;
use std::time::Duration;

use lingolink_core::config::chat::ChatConfig;
use lingolink_core::types::{ConversationId, UserId};
use lingolink_session::artifacts;
use lingolink_session::testing::{MemoryArtifactStore, RecordingProvider, StubTokenSource};
use lingolink_session::{
    SessionCoordinator, SessionState, StaleStateSweeper, TokenBroker, TokenSource,
};

#[tokio::test]
async fn test_full_session_lifecycle_with_identity_switch() {
    let provider = Arc::new(RecordingProvider::new());
    let local = Arc::new(MemoryArtifactStore::new("local"));
    let session_store = Arc::new(MemoryArtifactStore::new("session"));

    // Primary backend down; the fallback carries the day.
    let primary = Arc::new(StubTokenSource::failing("primary"));
    let fallback = Arc::new(StubTokenSource::ok("fallback"));
    let broker = TokenBroker::new(
        vec![
            primary.clone() as Arc<dyn TokenSource>,
            fallback.clone() as Arc<dyn TokenSource>,
        ],
        Duration::from_millis(500),
    );
    let sweeper = StaleStateSweeper::new(vec![local.clone(), session_store.clone()]);
    let coordinator = SessionCoordinator::new(
        &ChatConfig::default(),
        broker,
        provider.clone(),
        sweeper,
    );

    let (u1, u2, u3) = (UserId::new(), UserId::new(), UserId::new());
    local.insert(artifacts::token_key(u1), "cached-token");
    local.insert(artifacts::conversation_cache_key(u1), "cached-convs");

    // U1 opens a session with peer U2.
    let session = coordinator.open(u1, u2).await.unwrap();

    assert_eq!(coordinator.state().await, SessionState::Live);
    assert_eq!(session.conversation, ConversationId::between(u2, u1));
    assert_eq!(fallback.issue_count(), 1);
    assert!(session.token.value().starts_with("tok-fallback"));
    assert_eq!(provider.open_count(), 1);

    // Identity switches to U3 before any further action: the U1
    // connection is force-closed, U1-scoped artifacts are swept, and
    // the machine restarts from Idle.
    coordinator.reset(Some(u3)).await;

    assert_eq!(coordinator.state().await, SessionState::Idle);
    assert_eq!(provider.open_count(), 0);
    assert!(!local.contains(&artifacts::token_key(u1)));
    assert!(!local.contains(&artifacts::conversation_cache_key(u1)));

    // U3 starts fresh.
    let session = coordinator.open(u3, u2).await.unwrap();

    assert_eq!(coordinator.state().await, SessionState::Live);
    assert_eq!(session.conversation, ConversationId::between(u3, u2));
    assert_eq!(provider.max_open(), 1);
}
