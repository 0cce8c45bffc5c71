//! Model client trait — the abstraction over hosted LLM backends.
//!
//! A model client accepts a bounded ordered prompt and returns either a
//! single completion or a lazy, forward-only sequence of text fragments.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::prompt::PromptMessage;

/// Sampling options for one completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Caps total generated length.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling randomness (0.0 = deterministic).
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_max_tokens() -> u32 {
    1200
}

fn default_temperature() -> f32 {
    0.6
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// The receiving end of a fragment stream: in-order, forward-only,
/// non-restartable. Dropping it cancels the stream.
pub type FragmentReceiver = tokio::sync::mpsc::Receiver<Result<String, ModelError>>;

/// The core model client trait.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// A human-readable name for this client (e.g., "groq").
    fn name(&self) -> &str;

    /// Send a prompt and get the complete generated text.
    ///
    /// An empty completion is an error ([`ModelError::EmptyCompletion`]),
    /// never an empty string.
    async fn complete(
        &self,
        messages: Vec<PromptMessage>,
        options: CompletionOptions,
    ) -> Result<String, ModelError>;

    /// Send a prompt and get a stream of text fragments.
    ///
    /// Default implementation calls `complete()` and delivers the result
    /// as a single fragment.
    async fn stream(
        &self,
        messages: Vec<PromptMessage>,
        options: CompletionOptions,
    ) -> Result<FragmentReceiver, ModelError> {
        let text = self.complete(messages, options).await?;
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        let _ = tx.send(Ok(text)).await;
        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SingleShot;

    #[async_trait]
    impl ModelClient for SingleShot {
        fn name(&self) -> &str {
            "single_shot"
        }

        async fn complete(
            &self,
            _messages: Vec<PromptMessage>,
            _options: CompletionOptions,
        ) -> Result<String, ModelError> {
            Ok("full reply".into())
        }
    }

    #[test]
    fn options_defaults_match_service_tuning() {
        let opts = CompletionOptions::default();
        assert_eq!(opts.max_tokens, 1200);
        assert!((opts.temperature - 0.6).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn default_stream_wraps_complete_as_one_fragment() {
        let client = SingleShot;
        let mut rx = client
            .stream(vec![PromptMessage::user("hi")], CompletionOptions::default())
            .await
            .unwrap();

        let first = rx.recv().await.unwrap().unwrap();
        assert_eq!(first, "full reply");
        assert!(rx.recv().await.is_none());
    }
}
