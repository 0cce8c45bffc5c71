//! The chatbot endpoints.
//!
//! Wire shapes are camelCase JSON; error responses carry
//! `{ error, success: false }` with a `technicalError` field attached
//! only in development mode. Once streaming has begun, failures appear
//! only as apology text inside the body.

use std::convert::Infallible;

use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
};
use chrono::Utc;
use futures::StreamExt;
use serde::Serialize;
use tokio_stream::wrappers::ReceiverStream;
use tracing::info;

use hemolink_assistant::ChatRequest;
use hemolink_core::error::Error;
use hemolink_core::session::SessionId;

use crate::SharedState;

pub fn chatbot_router() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/chat/simple", post(chat_simple_handler))
        .route("/history/{session_id}", get(history_handler))
        .route("/conversation/{session_id}", delete(clear_handler))
        .route("/stats", get(stats_handler))
}

// --- Wire types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    technical_error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatSimpleResponse {
    success: bool,
    response: String,
    session_id: String,
    conversation_id: String,
    timestamp: String,
    message_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TurnDto {
    role: String,
    content: String,
    timestamp: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConversationDto {
    session_id: String,
    messages: Vec<TurnDto>,
    created_at: String,
    updated_at: String,
    message_count: usize,
}

#[derive(Serialize)]
struct HistoryResponse {
    success: bool,
    conversation: ConversationDto,
}

#[derive(Serialize)]
struct ClearResponse {
    success: bool,
    message: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsDto {
    total_conversations: usize,
    active_conversations: usize,
    total_messages: usize,
    recent_conversations: usize,
    average_messages_per_conversation: f64,
}

#[derive(Serialize)]
struct StatsResponse {
    success: bool,
    stats: StatsDto,
}

fn error_response(err: Error, development: bool) -> (StatusCode, Json<ErrorBody>) {
    let status = match &err {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = ErrorBody {
        error: err.user_message(),
        success: false,
        technical_error: development.then(|| err.to_string()),
    };
    (status, Json(body))
}

// --- Handlers ---

/// `POST /api/chatbot/chat` — chunked plain-text streaming.
///
/// Fragments are written to the body as the model produces them. The
/// session id rides in the `x-session-id` header so first-contact
/// clients learn their generated id.
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Response {
    match state.assistant.respond_streaming(payload).await {
        Ok(reply) => {
            let session_id = reply.session_id.0;
            let stream = ReceiverStream::new(reply.fragments)
                .map(|fragment| Ok::<_, Infallible>(axum::body::Bytes::from(fragment)));

            let mut response = (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                Body::from_stream(stream),
            )
                .into_response();
            if let Ok(value) = HeaderValue::from_str(&session_id) {
                response.headers_mut().insert("x-session-id", value);
            }
            response
        }
        Err(e) => error_response(e, state.assistant.development()).into_response(),
    }
}

/// `POST /api/chatbot/chat/simple` — one complete JSON reply.
async fn chat_simple_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatSimpleResponse>, (StatusCode, Json<ErrorBody>)> {
    let reply = state
        .assistant
        .respond(payload)
        .await
        .map_err(|e| error_response(e, state.assistant.development()))?;

    info!(session = %reply.session_id, messages = reply.message_count, "Chat reply sent");

    Ok(Json(ChatSimpleResponse {
        success: true,
        response: reply.text,
        session_id: reply.session_id.0.clone(),
        conversation_id: reply.session_id.0,
        timestamp: Utc::now().to_rfc3339(),
        message_count: reply.message_count,
    }))
}

/// `GET /api/chatbot/history/{session_id}`
async fn history_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, (StatusCode, Json<ErrorBody>)> {
    let development = state.assistant.development();
    let session = state
        .assistant
        .store()
        .get(&SessionId::from(session_id.as_str()))
        .await
        .map_err(|e| error_response(e.into(), development))?
        .ok_or_else(|| error_response(Error::NotFound(session_id.clone()), development))?;

    let messages = session
        .messages
        .iter()
        .map(|turn| TurnDto {
            role: match turn.role {
                hemolink_core::session::Role::User => "user".into(),
                hemolink_core::session::Role::Assistant => "assistant".into(),
            },
            content: turn.content.clone(),
            timestamp: turn.timestamp.to_rfc3339(),
        })
        .collect::<Vec<_>>();

    let message_count = messages.len();
    Ok(Json(HistoryResponse {
        success: true,
        conversation: ConversationDto {
            session_id: session.session_id.0,
            messages,
            created_at: session.created_at.to_rfc3339(),
            updated_at: session.updated_at.to_rfc3339(),
            message_count,
        },
    }))
}

/// `DELETE /api/chatbot/conversation/{session_id}`
async fn clear_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<ClearResponse>, (StatusCode, Json<ErrorBody>)> {
    let development = state.assistant.development();
    let cleared = state
        .assistant
        .store()
        .clear(&SessionId::from(session_id.as_str()))
        .await
        .map_err(|e| error_response(e.into(), development))?;

    if !cleared {
        return Err(error_response(Error::NotFound(session_id), development));
    }

    Ok(Json(ClearResponse {
        success: true,
        message: "Conversation cleared",
    }))
}

/// `GET /api/chatbot/stats`
async fn stats_handler(
    State(state): State<SharedState>,
) -> Result<Json<StatsResponse>, (StatusCode, Json<ErrorBody>)> {
    let development = state.assistant.development();
    let store = state.assistant.store();

    let total = store
        .count_sessions()
        .await
        .map_err(|e| error_response(e.into(), development))?;
    let active = store
        .count_active_sessions()
        .await
        .map_err(|e| error_response(e.into(), development))?;
    let messages = store
        .count_messages()
        .await
        .map_err(|e| error_response(e.into(), development))?;
    let recent = store
        .count_recent_sessions(chrono::Duration::hours(24))
        .await
        .map_err(|e| error_response(e.into(), development))?;

    let average = if total == 0 {
        0.0
    } else {
        (messages as f64 / total as f64 * 100.0).round() / 100.0
    };

    Ok(Json(StatsResponse {
        success: true,
        stats: StatsDto {
            total_conversations: total,
            active_conversations: active,
            total_messages: messages,
            recent_conversations: recent,
            average_messages_per_conversation: average,
        },
    }))
}
