//! Prompt assembly.
//!
//! Pure function from persisted history plus a knowledge snippet to the
//! ordered message list sent to the model. The caller bounds the history
//! window before calling; no bounding happens here.

use hemolink_core::prompt::PromptMessage;
use hemolink_core::session::{Role, Turn};

/// Introduces the knowledge snippet inside the system message.
pub const KNOWLEDGE_LABEL: &str = "\n\nRelevant Knowledge Base Information:\n";

/// Build the prompt for one completion request.
///
/// Produces exactly one leading system message (instructions, plus the
/// snippet under [`KNOWLEDGE_LABEL`] when present), the prior turns in
/// chronological order, and the new user message last.
///
/// The most recent history turn is dropped when its content equals
/// `new_user_message`: the orchestrator persists the user turn before
/// reading history, so the same text would otherwise appear twice.
/// The comparison is by value only.
pub fn assemble(
    system_instructions: &str,
    knowledge: Option<&str>,
    history: &[Turn],
    new_user_message: &str,
) -> Vec<PromptMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);

    let system = match knowledge {
        Some(snippet) => format!("{system_instructions}{KNOWLEDGE_LABEL}{snippet}"),
        None => system_instructions.to_string(),
    };
    messages.push(PromptMessage::system(system));

    let mut prior = history;
    if let Some(last) = prior.last() {
        if last.content == new_user_message {
            prior = &prior[..prior.len() - 1];
        }
    }

    for turn in prior {
        let message = match turn.role {
            Role::User => PromptMessage::user(&turn.content),
            Role::Assistant => PromptMessage::assistant(&turn.content),
        };
        messages.push(message);
    }

    messages.push(PromptMessage::user(new_user_message));
    messages
}
