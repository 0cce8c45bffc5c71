//! HTTP API gateway for Hemolink.
//!
//! Exposes the chatbot endpoints (streaming and simple), conversation
//! history and clearing, and service stats.
//!
//! Built on Axum for high performance async HTTP.

pub mod chatbot;

use axum::extract::DefaultBodyLimit;
use axum::{Router, response::Json, routing::get};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use hemolink_assistant::{AssistantConfig, ChatAssistant, SYSTEM_PROMPT};
use hemolink_config::AppConfig;
use hemolink_core::model::CompletionOptions;
use hemolink_knowledge::StaticKnowledgeBase;
use hemolink_providers::OpenAiCompatClient;
use hemolink_store::MemoryStore;

/// Shared application state for the gateway.
pub struct AppState {
    pub assistant: ChatAssistant,
}

pub type SharedState = Arc<AppState>;

/// Build the Axum router with all gateway routes.
///
/// Layers applied: CORS with a configurable origin, a 1 MB request body
/// limit, and HTTP trace logging.
pub fn build_router(state: SharedState, allowed_origin: &str) -> Router {
    let origin = if allowed_origin == "*" {
        AllowOrigin::any()
    } else {
        match allowed_origin.parse() {
            Ok(origin) => AllowOrigin::exact(origin),
            Err(_) => {
                warn!(origin = %allowed_origin, "Unparseable allowed_origin, allowing any");
                AllowOrigin::any()
            }
        }
    };

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/chatbot", chatbot::chatbot_router())
        .with_state(state)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server with the default backends: the Groq
/// client, the in-memory store, and the built-in knowledge base.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let api_key = config.api_key.clone().ok_or(
        "No API key configured — set GROQ_API_KEY or api_key in the config file",
    )?;

    let model = OpenAiCompatClient::new("groq", &config.api_url, api_key, &config.model);

    let assistant_config = AssistantConfig {
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
    };

    let assistant = ChatAssistant::new(
        assistant_config,
        Arc::new(MemoryStore::new()),
        Arc::new(StaticKnowledgeBase::new()),
        Arc::new(model),
    );

    let state = Arc::new(AppState { assistant });
    let app = build_router(state, &config.gateway.allowed_origin);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    info!(addr = %addr, model = %config.model, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
