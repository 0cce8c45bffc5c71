//! Conversation store trait — the abstraction over session persistence.
//!
//! The store is the single point of contention in the system. Implementors
//! must make `find_or_create` effectively atomic per session id (two
//! concurrent first messages for one new id must not create two records)
//! and keep appends for one session in chronological order.

use async_trait::async_trait;
use chrono::Duration;

use crate::error::StoreError;
use crate::session::{ConversationSession, Role, SessionId, Turn};

/// Persistence operations for conversation sessions.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// A human-readable name for this backend (e.g., "memory").
    fn name(&self) -> &str;

    /// Return the session for `session_id`, creating it if absent.
    /// Must be atomic per session id.
    async fn find_or_create(
        &self,
        session_id: &SessionId,
        user_id: &str,
    ) -> Result<ConversationSession, StoreError>;

    /// Append a turn to an existing session, advancing `updated_at`.
    /// Returns the stored turn.
    async fn append(
        &self,
        session_id: &SessionId,
        role: Role,
        content: &str,
    ) -> Result<Turn, StoreError>;

    /// The most recent `n` turns of the session, chronological order.
    /// An unknown session id yields an empty sequence.
    async fn recent(&self, session_id: &SessionId, n: usize) -> Result<Vec<Turn>, StoreError>;

    /// Fetch a session by id, if it exists.
    async fn get(&self, session_id: &SessionId)
    -> Result<Option<ConversationSession>, StoreError>;

    /// Remove all turns from the session. `Ok(false)` if no such session.
    async fn clear(&self, session_id: &SessionId) -> Result<bool, StoreError>;

    // --- Reporting (no core pipeline dependency) ---

    /// Total sessions on record.
    async fn count_sessions(&self) -> Result<usize, StoreError>;

    /// Sessions that currently hold at least one turn.
    async fn count_active_sessions(&self) -> Result<usize, StoreError>;

    /// Total turns across all sessions.
    async fn count_messages(&self) -> Result<usize, StoreError>;

    /// Sessions updated within the trailing `window`.
    async fn count_recent_sessions(&self, window: Duration) -> Result<usize, StoreError>;
}
