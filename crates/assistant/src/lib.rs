//! Conversation assembly and response orchestration.
//!
//! The pipeline: validate the inbound message, persist the user turn,
//! gather recent history and a knowledge snippet, assemble a bounded
//! prompt, invoke the model, normalize the reply once, persist it.

pub mod context;
pub mod orchestrator;
pub mod prompts;

pub use context::assemble;
pub use orchestrator::{
    AssistantConfig, ChatAssistant, ChatReply, ChatRequest, StreamingReply, TranscriptAccumulator,
};
pub use prompts::{FALLBACK_APOLOGY, SYSTEM_PROMPT};
