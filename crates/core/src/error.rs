//! Error types for the Hemolink domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Hemolink operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A request failed validation before any side effect ran.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation referenced a session that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    // --- Model client errors ---
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    // --- Store errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Human-readable, non-technical text for the failure, suitable for
    /// showing to an end user. The technical description stays behind the
    /// development-mode diagnostic field at the HTTP boundary.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            Error::NotFound(_) => "Conversation not found".into(),
            Error::Model(model_err) => model_err.user_message().into(),
            Error::Store(_) => {
                "We're having trouble saving your conversation right now. Please try again in a moment.".into()
            }
            _ => {
                "I apologize, but our chat service is temporarily unavailable. Please try again in a moment or contact our support team directly.".into()
            }
        }
    }
}

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("API request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Stream interrupted: {0}")]
    StreamInterrupted(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Model returned an empty completion")]
    EmptyCompletion,
}

impl ModelError {
    /// Category-specific apology text (credential/config, rate-limit,
    /// connectivity, generic).
    pub fn user_message(&self) -> &'static str {
        match self {
            ModelError::AuthenticationFailed(_) => {
                "Chat service configuration issue. Please contact support."
            }
            ModelError::RateLimited { .. } => {
                "I'm receiving too many requests. Please wait a moment and try again."
            }
            ModelError::Network(_) | ModelError::Timeout(_) => {
                "Network connectivity issue. Please check your connection and try again."
            }
            _ => "I apologize, but I'm having trouble responding right now.",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_error_displays_correctly() {
        let err = Error::Model(ModelError::Api {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn rate_limit_maps_to_rate_limit_message() {
        let err = Error::Model(ModelError::RateLimited {
            retry_after_secs: 5,
        });
        assert!(err.user_message().contains("too many requests"));
    }

    #[test]
    fn auth_failure_maps_to_configuration_message() {
        let err = Error::Model(ModelError::AuthenticationFailed("bad key".into()));
        assert!(err.user_message().contains("configuration"));
    }

    #[test]
    fn network_failure_maps_to_connectivity_message() {
        let err = Error::Model(ModelError::Network("connection refused".into()));
        assert!(err.user_message().contains("connectivity"));
    }

    #[test]
    fn unknown_model_failure_falls_back_to_generic_apology() {
        let err = Error::Model(ModelError::EmptyCompletion);
        assert!(err.user_message().contains("trouble responding"));
    }

    #[test]
    fn user_message_never_leaks_technical_detail() {
        let err = Error::Store(StoreError::Storage("mongodb://secret-host:27017".into()));
        assert!(!err.user_message().contains("mongodb"));
    }
}
