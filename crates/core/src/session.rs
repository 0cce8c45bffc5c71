//! Session and Turn domain types.
//!
//! A `ConversationSession` is the persisted record of one chat session:
//! an append-only sequence of role-tagged turns keyed by a globally
//! unique session id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The user id recorded when a visitor chats without signing in.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Unique identifier for a conversation session.
///
/// Client-supplied or server-generated; either way it must be globally
/// unique — a collision would merge two users' conversations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a turn's author within a session.
///
/// Only the two persisted roles live here; `system` exists solely in the
/// ephemeral prompt (see [`crate::prompt::PromptRole`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The assistant's (normalized) reply
    Assistant,
}

/// A single turn in a conversation session.
///
/// Immutable once appended: there are no in-place edits, only the
/// session-level clear operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Unique turn ID
    pub id: String,

    /// Who authored this turn
    pub role: Role,

    /// Raw text for user turns, normalized markdown for assistant turns
    pub content: String,

    /// Creation time; non-decreasing within a session
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Create a new user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A conversation session: an ordered, append-only sequence of turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSession {
    /// Globally unique session id
    pub session_id: SessionId,

    /// Owning user, or [`ANONYMOUS_USER`]
    pub user_id: String,

    /// Ordered turns; insertion order = chronological order
    pub messages: Vec<Turn>,

    /// When this session was created
    pub created_at: DateTime<Utc>,

    /// Advances on every append or clear
    pub updated_at: DateTime<Utc>,

    /// Cleared sessions stay addressable but count as inactive
    pub is_active: bool,
}

impl ConversationSession {
    /// Create a new empty session for the given ids.
    pub fn new(session_id: SessionId, user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            user_id: user_id.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }

    /// Append a turn, advancing `updated_at`.
    pub fn push(&mut self, turn: Turn) {
        self.updated_at = Utc::now();
        self.messages.push(turn);
    }

    /// Remove all turns, advancing `updated_at`. The session record itself
    /// survives and is marked inactive until the next append.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// The most recent `n` turns, in chronological order.
    pub fn recent(&self, n: usize) -> Vec<Turn> {
        let start = self.messages.len().saturating_sub(n);
        self.messages[start..].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_turn() {
        let turn = Turn::user("I'd like to donate blood");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.content, "I'd like to donate blood");
    }

    #[test]
    fn session_tracks_updates() {
        let mut session = ConversationSession::new(SessionId::new(), ANONYMOUS_USER);
        let created = session.created_at;

        session.push(Turn::user("First message"));
        assert_eq!(session.messages.len(), 1);
        assert!(session.updated_at >= created);
    }

    #[test]
    fn clear_empties_messages_and_advances_updated_at() {
        let mut session = ConversationSession::new(SessionId::new(), "donor-42");
        session.push(Turn::user("hello"));
        session.push(Turn::assistant("Hi! How can I help?"));
        let before = session.updated_at;

        session.clear();
        assert!(session.messages.is_empty());
        assert!(!session.is_active);
        assert!(session.updated_at >= before);
    }

    #[test]
    fn recent_returns_last_n_in_chronological_order() {
        let mut session = ConversationSession::new(SessionId::new(), ANONYMOUS_USER);
        for i in 0..10 {
            session.push(Turn::user(format!("message {i}")));
        }

        let recent = session.recent(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].content, "message 7");
        assert_eq!(recent[2].content, "message 9");
    }

    #[test]
    fn recent_with_short_history_returns_everything() {
        let mut session = ConversationSession::new(SessionId::new(), ANONYMOUS_USER);
        session.push(Turn::user("only one"));
        assert_eq!(session.recent(8).len(), 1);
    }

    #[test]
    fn timestamps_non_decreasing_within_session() {
        let mut session = ConversationSession::new(SessionId::new(), ANONYMOUS_USER);
        for i in 0..5 {
            session.push(Turn::user(format!("m{i}")));
        }
        for pair in session.messages.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn turn_serialization_roundtrip() {
        let turn = Turn::assistant("**Eligibility:**\n\n• Age 18-65");
        let json = serde_json::to_string(&turn).unwrap();
        let deserialized: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.content, turn.content);
        assert_eq!(deserialized.role, Role::Assistant);
    }
}
