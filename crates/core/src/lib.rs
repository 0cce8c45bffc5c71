//! # Hemolink Core
//!
//! Domain types, traits, and error definitions for the Hemolink assistant
//! backend. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (conversation store, knowledge base, model
//! client) is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod knowledge;
pub mod model;
pub mod prompt;
pub mod session;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ModelError, Result, StoreError};
pub use knowledge::{KnowledgeBase, KnowledgeSnippet};
pub use model::{CompletionOptions, FragmentReceiver, ModelClient};
pub use prompt::{PromptMessage, PromptRole};
pub use session::{ANONYMOUS_USER, ConversationSession, Role, SessionId, Turn};
pub use store::ConversationStore;
