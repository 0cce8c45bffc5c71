//! `hemolink ask` — One-shot question through the full pipeline.

use std::path::Path;
use std::sync::Arc;

use hemolink_assistant::{AssistantConfig, ChatAssistant, ChatRequest, SYSTEM_PROMPT};
use hemolink_config::AppConfig;
use hemolink_core::model::CompletionOptions;
use hemolink_knowledge::StaticKnowledgeBase;
use hemolink_providers::OpenAiCompatClient;
use hemolink_store::MemoryStore;

pub async fn run(config_path: &Path, question: String) -> Result<(), Box<dyn std::error::Error>> {
    let config =
        AppConfig::load(config_path).map_err(|e| format!("Failed to load config: {e}"))?;

    let api_key = config
        .api_key
        .clone()
        .ok_or("No API key configured — set GROQ_API_KEY or api_key in the config file")?;

    let model = OpenAiCompatClient::new("groq", &config.api_url, api_key, &config.model);

    let assistant = ChatAssistant::new(
        AssistantConfig {
            system_prompt: config
                .system_prompt_override
                .clone()
                .unwrap_or_else(|| SYSTEM_PROMPT.to_string()),
            options: CompletionOptions {
                max_tokens: config.max_tokens,
                temperature: config.temperature,
            },
            history_window: config.history_window,
            development: config.development,
        },
        Arc::new(MemoryStore::new()),
        Arc::new(StaticKnowledgeBase::new()),
        Arc::new(model),
    );

    let reply = assistant
        .respond(ChatRequest {
            session_id: None,
            user_id: None,
            message: question,
        })
        .await?;

    println!("{}", reply.text);

    Ok(())
}
