//! Error types for the GeoExplorer client.
//!
//! # Design
//! Bindings and the transport return `ApiError` unchanged; only the query and
//! mutation controllers catch it, storing it in their observable state. The
//! type is `Clone` so a single failure can sit in a `watch` channel and be
//! read by every observer.

use thiserror::Error;

/// Fallback message for a failure that carried no message of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Errors produced by the transport, the bindings, and the controllers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status. `message` is the `detail`
    /// field of the error body when present.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// The service answered 2xx but the body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A failure that did not originate from the API, normalized to a message.
    #[error("{0}")]
    Client(String),
}

impl ApiError {
    /// Human-readable message suitable for an error state on screen.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Status code of a `Remote` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
