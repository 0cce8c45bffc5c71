//! The response orchestrator.
//!
//! One pipeline, two delivery modes. Side effects run in a fixed order:
//! resolve-or-create the session, append the user turn, fetch history and
//! a knowledge snippet (concurrently), assemble the prompt, invoke the
//! model, normalize the reply once, append the assistant turn.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use hemolink_core::error::{Error, Result, StoreError};
use hemolink_core::knowledge::KnowledgeBase;
use hemolink_core::model::{CompletionOptions, ModelClient};
use hemolink_core::prompt::PromptMessage;
use hemolink_core::session::{ANONYMOUS_USER, Role, SessionId};
use hemolink_core::store::ConversationStore;
use hemolink_format::normalize;

use crate::context::assemble;
use crate::prompts::{FALLBACK_APOLOGY, SYSTEM_PROMPT};

/// Tuning for the assistant, injected at construction time.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// The leading system message for every prompt.
    pub system_prompt: String,
    /// Sampling options passed to the model client.
    pub options: CompletionOptions,
    /// How many recent turns of history go into the prompt.
    pub history_window: usize,
    /// Development mode attaches technical detail to error responses.
    pub development: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            system_prompt: SYSTEM_PROMPT.to_string(),
            options: CompletionOptions::default(),
            history_window: 8,
            development: false,
        }
    }
}

/// One inbound chat message, in the wire shape clients send.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// The non-streaming reply.
#[derive(Debug)]
pub struct ChatReply {
    pub text: String,
    pub session_id: SessionId,
    pub message_count: usize,
}

/// The streaming reply: the session the fragments belong to plus the
/// receiving end of the fragment stream.
pub struct StreamingReply {
    pub session_id: SessionId,
    pub fragments: mpsc::Receiver<String>,
}

/// Accumulates forwarded fragments into the full transcript.
///
/// Forwarding to the caller and accumulation are two independent
/// consumers of the fragment stream; this is the second one, and it is
/// what gets normalized and persisted after the stream ends.
#[derive(Debug, Default)]
pub struct TranscriptAccumulator {
    text: String,
}

impl TranscriptAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: &str) {
        self.text.push_str(fragment);
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

struct PreparedPrompt {
    session_id: SessionId,
    messages: Vec<PromptMessage>,
}

/// The orchestrator. Collaborators are injected so each can be replaced
/// with a test double.
pub struct ChatAssistant {
    config: AssistantConfig,
    store: Arc<dyn ConversationStore>,
    knowledge: Arc<dyn KnowledgeBase>,
    model: Arc<dyn ModelClient>,
}

impl ChatAssistant {
    pub fn new(
        config: AssistantConfig,
        store: Arc<dyn ConversationStore>,
        knowledge: Arc<dyn KnowledgeBase>,
        model: Arc<dyn ModelClient>,
    ) -> Self {
        Self {
            config,
            store,
            knowledge,
            model,
        }
    }

    pub fn store(&self) -> &Arc<dyn ConversationStore> {
        &self.store
    }

    pub fn development(&self) -> bool {
        self.config.development
    }

    /// Shared front half of both modes: validate, persist the user turn,
    /// gather context, assemble the prompt.
    async fn prepare(&self, request: &ChatRequest) -> Result<PreparedPrompt> {
        if request.message.trim().is_empty() {
            return Err(Error::Validation("Message is required".into()));
        }

        let session_id = match &request.session_id {
            Some(id) if !id.trim().is_empty() => SessionId::from(id.as_str()),
            _ => SessionId::new(),
        };
        let user_id = request
            .user_id
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(ANONYMOUS_USER);

        self.store.find_or_create(&session_id, user_id).await?;
        self.store
            .append(&session_id, Role::User, &request.message)
            .await?;

        // History and knowledge have no ordering dependency on each other
        let (history, snippets) = tokio::join!(
            self.store.recent(&session_id, self.config.history_window),
            self.knowledge.search(&request.message),
        );
        let history = history?;
        let snippet = snippets.first().map(|s| s.content.as_str());

        debug!(
            session = %session_id,
            history = history.len(),
            knowledge = snippet.is_some(),
            "Assembling prompt"
        );

        let messages = assemble(
            &self.config.system_prompt,
            snippet,
            &history,
            &request.message,
        );

        Ok(PreparedPrompt {
            session_id,
            messages,
        })
    }

    /// Non-streaming mode: one complete model call, normalized and
    /// persisted. An empty completion is fatal for the request.
    pub async fn respond(&self, request: ChatRequest) -> Result<ChatReply> {
        let prepared = self.prepare(&request).await?;

        let raw = self
            .model
            .complete(prepared.messages, self.config.options.clone())
            .await?;

        let text = normalize(&raw);
        self.store
            .append(&prepared.session_id, Role::Assistant, &text)
            .await?;

        let message_count = self
            .store
            .get(&prepared.session_id)
            .await?
            .map(|s| s.messages.len())
            .unwrap_or(0);

        Ok(ChatReply {
            text,
            session_id: prepared.session_id,
            message_count,
        })
    }

    /// Streaming mode: fragments are forwarded as produced and
    /// simultaneously accumulated. A model failure is absorbed into the
    /// stream as [`FALLBACK_APOLOGY`]; after the stream ends the full
    /// transcript is normalized once and persisted. If the caller drops
    /// the receiver, forwarding stops and nothing is persisted.
    pub async fn respond_streaming(&self, request: ChatRequest) -> Result<StreamingReply> {
        let prepared = self.prepare(&request).await?;

        let upstream = self
            .model
            .stream(prepared.messages, self.config.options.clone())
            .await;

        let (tx, rx) = mpsc::channel(64);
        let store = self.store.clone();
        let session_id = prepared.session_id.clone();

        tokio::spawn(async move {
            let mut accumulator = TranscriptAccumulator::new();

            match upstream {
                Ok(mut fragments) => {
                    while let Some(item) = fragments.recv().await {
                        match item {
                            Ok(fragment) => {
                                accumulator.push(&fragment);
                                if tx.send(fragment).await.is_err() {
                                    // caller disconnected: abandon, persist nothing
                                    return;
                                }
                            }
                            Err(e) => {
                                warn!(session = %session_id, error = %e, "Model failed mid-stream");
                                accumulator.push(FALLBACK_APOLOGY);
                                let _ = tx.send(FALLBACK_APOLOGY.to_string()).await;
                                break;
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!(session = %session_id, error = %e, "Model stream failed to start");
                    accumulator.push(FALLBACK_APOLOGY);
                    let _ = tx.send(FALLBACK_APOLOGY.to_string()).await;
                }
            }

            if accumulator.is_empty() {
                return;
            }

            let text = normalize(&accumulator.into_text());
            if let Err(e) = persist_assistant_turn(&store, &session_id, &text).await {
                warn!(session = %session_id, error = %e, "Failed to persist assistant turn");
            }
        });

        Ok(StreamingReply {
            session_id: prepared.session_id,
            fragments: rx,
        })
    }
}

async fn persist_assistant_turn(
    store: &Arc<dyn ConversationStore>,
    session_id: &SessionId,
    text: &str,
) -> std::result::Result<(), StoreError> {
    store.append(session_id, Role::Assistant, text).await?;
    Ok(())
}
