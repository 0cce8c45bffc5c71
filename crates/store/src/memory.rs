//! In-memory store — the default backend for a single-process deployment.
//!
//! All operations take the one map-wide write lock, which makes
//! find-or-create atomic per session id and keeps appends for any one
//! session in chronological order. Requests on different sessions still
//! run concurrently everywhere outside these short critical sections.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use hemolink_core::error::StoreError;
use hemolink_core::session::{ConversationSession, Role, SessionId, Turn};
use hemolink_core::store::ConversationStore;

/// Maximum number of sessions before the oldest is evicted.
const MAX_SESSIONS: usize = 10_000;

/// An in-memory conversation store backed by a `HashMap`.
pub struct MemoryStore {
    sessions: RwLock<HashMap<String, ConversationSession>>,
    max_sessions: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_capacity(MAX_SESSIONS)
    }

    /// A store bounded to `max_sessions` live sessions.
    pub fn with_capacity(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn find_or_create(
        &self,
        session_id: &SessionId,
        user_id: &str,
    ) -> Result<ConversationSession, StoreError> {
        let mut sessions = self.sessions.write().await;

        // Evict oldest session if at capacity
        if sessions.len() >= self.max_sessions && !sessions.contains_key(&session_id.0) {
            if let Some(oldest_key) = sessions
                .iter()
                .min_by_key(|(_, s)| s.created_at)
                .map(|(k, _)| k.clone())
            {
                debug!(session = %oldest_key, "Evicting oldest session at capacity");
                sessions.remove(&oldest_key);
            }
        }

        let session = sessions
            .entry(session_id.0.clone())
            .or_insert_with(|| ConversationSession::new(session_id.clone(), user_id));
        Ok(session.clone())
    }

    async fn append(
        &self,
        session_id: &SessionId,
        role: Role,
        content: &str,
    ) -> Result<Turn, StoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&session_id.0)
            .ok_or_else(|| StoreError::Storage(format!("unknown session: {session_id}")))?;

        let turn = match role {
            Role::User => Turn::user(content),
            Role::Assistant => Turn::assistant(content),
        };
        session.is_active = true;
        session.push(turn.clone());
        Ok(turn)
    }

    async fn recent(&self, session_id: &SessionId, n: usize) -> Result<Vec<Turn>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(&session_id.0)
            .map(|s| s.recent(n))
            .unwrap_or_default())
    }

    async fn get(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<ConversationSession>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&session_id.0).cloned())
    }

    async fn clear(&self, session_id: &SessionId) -> Result<bool, StoreError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session_id.0) {
            Some(session) => {
                session.clear();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_sessions(&self) -> Result<usize, StoreError> {
        Ok(self.sessions.read().await.len())
    }

    async fn count_active_sessions(&self) -> Result<usize, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.values().filter(|s| s.is_active).count())
    }

    async fn count_messages(&self) -> Result<usize, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.values().map(|s| s.messages.len()).sum())
    }

    async fn count_recent_sessions(&self, window: Duration) -> Result<usize, StoreError> {
        let cutoff = Utc::now() - window;
        let sessions = self.sessions.read().await;
        Ok(sessions.values().filter(|s| s.updated_at >= cutoff).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn find_or_create_returns_same_session() {
        let store = MemoryStore::new();
        let id = SessionId::from("session-1");

        let first = store.find_or_create(&id, "anonymous").await.unwrap();
        store.append(&id, Role::User, "hello").await.unwrap();
        let second = store.find_or_create(&id, "anonymous").await.unwrap();

        assert_eq!(first.session_id, second.session_id);
        assert_eq!(second.messages.len(), 1);
        assert_eq!(store.count_sessions().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn appends_stay_in_chronological_order() {
        let store = MemoryStore::new();
        let id = SessionId::from("session-1");
        store.find_or_create(&id, "anonymous").await.unwrap();

        store.append(&id, Role::User, "first").await.unwrap();
        store.append(&id, Role::Assistant, "second").await.unwrap();
        store.append(&id, Role::User, "third").await.unwrap();

        let turns = store.recent(&id, 8).await.unwrap();
        let contents: Vec<&str> = turns.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn recent_bounds_the_window() {
        let store = MemoryStore::new();
        let id = SessionId::from("session-1");
        store.find_or_create(&id, "anonymous").await.unwrap();
        for i in 0..12 {
            store
                .append(&id, Role::User, &format!("m{i}"))
                .await
                .unwrap();
        }

        let turns = store.recent(&id, 8).await.unwrap();
        assert_eq!(turns.len(), 8);
        assert_eq!(turns[0].content, "m4");
        assert_eq!(turns[7].content, "m11");
    }

    #[tokio::test]
    async fn clear_empties_messages_and_reports_unknown_ids() {
        let store = MemoryStore::new();
        let id = SessionId::from("session-1");
        store.find_or_create(&id, "anonymous").await.unwrap();
        store.append(&id, Role::User, "hello").await.unwrap();

        assert!(store.clear(&id).await.unwrap());
        assert!(store.recent(&id, 8).await.unwrap().is_empty());
        assert_eq!(
            store.get(&id).await.unwrap().unwrap().messages.len(),
            0
        );

        let missing = SessionId::from("no-such-session");
        assert!(!store.clear(&missing).await.unwrap());
    }

    #[tokio::test]
    async fn at_capacity_the_oldest_session_is_evicted() {
        let store = MemoryStore::with_capacity(3);
        for name in ["s1", "s2", "s3"] {
            store
                .find_or_create(&SessionId::from(name), "anonymous")
                .await
                .unwrap();
            // created_at is the eviction key; keep the timestamps apart
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        // Revisiting an existing session at capacity evicts nothing
        store
            .find_or_create(&SessionId::from("s2"), "anonymous")
            .await
            .unwrap();
        assert_eq!(store.count_sessions().await.unwrap(), 3);
        assert!(store.get(&SessionId::from("s1")).await.unwrap().is_some());

        store
            .find_or_create(&SessionId::from("s4"), "anonymous")
            .await
            .unwrap();
        assert_eq!(store.count_sessions().await.unwrap(), 3);
        assert!(store.get(&SessionId::from("s1")).await.unwrap().is_none());
        assert!(store.get(&SessionId::from("s4")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn concurrent_first_contact_same_id_creates_one_session() {
        let store = Arc::new(MemoryStore::new());
        let id = SessionId::from("raced-session");

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                store.find_or_create(&id, "anonymous").await.unwrap();
                store.append(&id, Role::User, "hi").await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.count_sessions().await.unwrap(), 1);
        let session = store.get(&id).await.unwrap().unwrap();
        assert_eq!(session.messages.len(), 16);
    }

    #[tokio::test]
    async fn distinct_sessions_stay_isolated() {
        let store = Arc::new(MemoryStore::new());
        let a = SessionId::from("session-a");
        let b = SessionId::from("session-b");

        tokio::join!(
            async {
                store.find_or_create(&a, "anonymous").await.unwrap();
                store.append(&a, Role::User, "from a").await.unwrap();
                store.append(&a, Role::Assistant, "reply a").await.unwrap();
            },
            async {
                store.find_or_create(&b, "anonymous").await.unwrap();
                store.append(&b, Role::User, "from b").await.unwrap();
                store.append(&b, Role::Assistant, "reply b").await.unwrap();
            }
        );

        assert_eq!(store.count_sessions().await.unwrap(), 2);
        let turns_a = store.recent(&a, 8).await.unwrap();
        assert!(turns_a.iter().all(|t| t.content.ends_with('a')));
        let turns_b = store.recent(&b, 8).await.unwrap();
        assert!(turns_b.iter().all(|t| t.content.ends_with('b')));
    }

    #[tokio::test]
    async fn reporting_counters() {
        let store = MemoryStore::new();
        let a = SessionId::from("a");
        let b = SessionId::from("b");
        store.find_or_create(&a, "anonymous").await.unwrap();
        store.find_or_create(&b, "donor-7").await.unwrap();
        store.append(&a, Role::User, "q").await.unwrap();
        store.append(&a, Role::Assistant, "r").await.unwrap();
        store.append(&b, Role::User, "q").await.unwrap();
        store.clear(&b).await.unwrap();

        assert_eq!(store.count_sessions().await.unwrap(), 2);
        assert_eq!(store.count_active_sessions().await.unwrap(), 1);
        assert_eq!(store.count_messages().await.unwrap(), 2);
        assert_eq!(
            store
                .count_recent_sessions(Duration::hours(24))
                .await
                .unwrap(),
            2
        );
    }
}
