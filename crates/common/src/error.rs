//! Error types

use thiserror::Error;

/// Terminal failure of a single webhook delivery
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing event type")]
    MissingEventType,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Unknown event")]
    UnrecognizedEventKind(String),

    #[error("Outbound call failed: {0}")]
    OutboundCall(String),
}

impl Error {
    /// Whether the failure is attributable to the sender of the webhook
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Error::OutboundCall(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
