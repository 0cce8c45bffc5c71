//! Conversation store backends for Hemolink.
//!
//! All backends implement `hemolink_core::ConversationStore`.

pub mod memory;

pub use memory::MemoryStore;
