//! OpenAI-compatible model client.
//!
//! Works with Groq (the default deployment target), OpenAI, OpenRouter,
//! Ollama, and any other endpoint exposing an OpenAI-compatible
//! `/chat/completions` route. Supports non-streaming completions and
//! streaming SSE.

use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use hemolink_core::error::ModelError;
use hemolink_core::model::{CompletionOptions, FragmentReceiver, ModelClient};
use hemolink_core::prompt::PromptMessage;

/// The Groq OpenAI-compatible API root.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// The default chat model on Groq.
pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";

/// A chat model client speaking the OpenAI wire format.
pub struct OpenAiCompatClient {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiCompatClient {
    /// Create a new OpenAI-compatible client.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        }
    }

    /// Create a Groq client (convenience constructor).
    pub fn groq(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new("groq", GROQ_BASE_URL, api_key, model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Convert prompt messages to the wire format.
    fn to_api_messages(messages: &[PromptMessage]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: m.role.as_str().to_string(),
                content: Some(m.content.clone()),
            })
            .collect()
    }

    fn request_body(
        &self,
        messages: &[PromptMessage],
        options: &CompletionOptions,
        stream: bool,
    ) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": Self::to_api_messages(messages),
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
            "stream": stream,
        })
    }

    fn map_send_error(e: reqwest::Error) -> ModelError {
        if e.is_timeout() {
            ModelError::Timeout(e.to_string())
        } else {
            ModelError::Network(e.to_string())
        }
    }

    /// Turn a non-200 status into the matching error, consuming the body.
    async fn status_error(response: reqwest::Response) -> ModelError {
        let status = response.status().as_u16();

        if status == 429 {
            return ModelError::RateLimited {
                retry_after_secs: 5,
            };
        }
        if status == 401 || status == 403 {
            return ModelError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            );
        }

        let error_body = response.text().await.unwrap_or_default();
        warn!(status, body = %error_body, "Model API returned error");
        ModelError::Api {
            status_code: status,
            message: error_body,
        }
    }
}

#[async_trait]
impl ModelClient for OpenAiCompatClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        messages: Vec<PromptMessage>,
        options: CompletionOptions,
    ) -> Result<String, ModelError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.request_body(&messages, &options, false);

        debug!(client = %self.name, model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        if response.status().as_u16() != 200 {
            return Err(Self::status_error(response).await);
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| ModelError::Api {
            status_code: 200,
            message: format!("Failed to parse response: {e}"),
        })?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(ModelError::EmptyCompletion);
        }

        Ok(content)
    }

    async fn stream(
        &self,
        messages: Vec<PromptMessage>,
        options: CompletionOptions,
    ) -> Result<FragmentReceiver, ModelError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.request_body(&messages, &options, true);

        debug!(client = %self.name, model = %self.model, "Sending streaming request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(&body)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        if response.status().as_u16() != 200 {
            return Err(Self::status_error(response).await);
        }

        let (tx, rx) = tokio::sync::mpsc::channel(64);
        let client_name = self.name.clone();

        // Read the SSE byte stream and forward content deltas
        tokio::spawn(async move {
            let mut byte_stream = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk_result) = byte_stream.next().await {
                let bytes = match chunk_result {
                    Ok(b) => b,
                    Err(e) => {
                        let _ = tx
                            .send(Err(ModelError::StreamInterrupted(e.to_string())))
                            .await;
                        return;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&bytes));

                // Process complete lines
                while let Some(line_end) = buffer.find('\n') {
                    let line = buffer[..line_end].trim_end_matches('\r').to_string();
                    buffer = buffer[line_end + 1..].to_string();

                    // Skip empty lines and SSE comments
                    if line.is_empty() || line.starts_with(':') {
                        continue;
                    }

                    if let Some(data) = line.strip_prefix("data: ") {
                        let data = data.trim();

                        if data == "[DONE]" {
                            return;
                        }

                        match serde_json::from_str::<StreamResponse>(data) {
                            Ok(stream_resp) => {
                                let fragment = stream_resp
                                    .choices
                                    .first()
                                    .and_then(|c| c.delta.content.clone());

                                if let Some(fragment) = fragment {
                                    if !fragment.is_empty()
                                        && tx.send(Ok(fragment)).await.is_err()
                                    {
                                        return; // receiver dropped
                                    }
                                }
                            }
                            Err(e) => {
                                trace!(
                                    client = %client_name,
                                    data = %data,
                                    error = %e,
                                    "Ignoring unparseable SSE chunk"
                                );
                            }
                        }
                    }
                }
            }
        });

        Ok(rx)
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

/// A single SSE `data: {...}` chunk from a streaming response.
#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
    #[serde(default)]
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}
