//! API error handling
//!
//! Webhook failures are answered in plain text so the delivery log on
//! GitHub shows the diagnostic as-is. Logging happens where the failure
//! is detected, not here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
/// API error type that converts to plain-text responses
#[derive(Debug)]
pub enum ApiError {
    /// The delivery could not be classified
    BadRequest(String),
    /// The delivery named an event kind we do not handle
    UnknownEvent,
    /// A call back to GitHub failed
    Outbound(String),
}

impl From<common::Error> for ApiError {
    fn from(err: common::Error) -> Self {
        match err {
            common::Error::UnrecognizedEventKind(_) => ApiError::UnknownEvent,
            common::Error::OutboundCall(_) => ApiError::Outbound(err.to_string()),
            common::Error::MissingEventType | common::Error::MalformedPayload(_) => {
                ApiError::BadRequest(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::UnknownEvent => (StatusCode::BAD_REQUEST, "Unknown event").into_response(),
            ApiError::Outbound(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response(),
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
