//! Error types for validation, signing and transport failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Library-level errors.
///
/// The validation variants are deterministic functions of the caller's input
/// and are raised before any signature is computed. A failed webhook
/// signature is not an error; see [`crate::models::WebhookVerification`].
#[derive(Error, Debug)]
pub enum PusherError {
    #[error("Channel name \"{0}\" contains characters that are not allowed")]
    ChannelNameFormat(String),

    #[error("Channel name is {length} characters long, the maximum is {max}")]
    ChannelNameLength { length: usize, max: usize },

    #[error("Socket id \"{0}\" is not in the format <digits>.<digits>")]
    SocketIdFormat(String),

    #[error("Event batch holds {size} events, the maximum is {max}")]
    BatchSizeExceeded { size: usize, max: usize },

    #[error(
        "The data content of this event exceeds the allowed maximum ({limit} bytes). The actual size is {actual} bytes."
    )]
    EventDataSizeExceeded { limit: usize, actual: usize },

    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid host \"{0}\": the host must not include a scheme")]
    InvalidHost(String),

    #[error("HTTP API responded with status {status}: {body}")]
    Response { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl PusherError {
    /// True for errors raised by input validation (caller mistakes).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PusherError::ChannelNameFormat(_)
                | PusherError::ChannelNameLength { .. }
                | PusherError::SocketIdFormat(_)
                | PusherError::BatchSizeExceeded { .. }
                | PusherError::EventDataSizeExceeded { .. }
                | PusherError::MissingRequiredField(_)
                | PusherError::Validation(_)
        )
    }
}

impl IntoResponse for PusherError {
    fn into_response(self) -> Response {
        let status = match &self {
            e if e.is_validation() => StatusCode::BAD_REQUEST,
            PusherError::Serialization(_) => StatusCode::BAD_REQUEST,
            PusherError::Response { .. } | PusherError::Transport(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub type PusherResult<T> = Result<T, PusherError>;
