//! Error types for the API client.

use crate::types::ParseError;

/// The single error surface of [`Client`](crate::Client) calls.
#[derive(thiserror::Error, Debug)]
pub enum NewsApiError {
    /// The request could not be sent or its body could not be read
    /// (connection, TLS, or session construction failure).
    #[error("Request failed")]
    Transport(#[from] reqwest::Error),
    /// The API answered with a non-success status. `body` is a truncated snippet.
    /// `source` is only set for 4xx and 5xx, which reqwest reports itself.
    #[error("Request failed with status {status}")]
    HttpStatus {
        status: u16,
        body: String,
        #[source]
        source: Option<reqwest::Error>,
    },
    /// A success response did not match the expected shape.
    #[error("Failed to parse response")]
    Parse(#[from] ParseError),
    /// The configured base URL cannot be joined with an endpoint path.
    #[error("Invalid endpoint URL")]
    InvalidUrl(#[from] url::ParseError),
    /// The client's session was already released.
    #[error("Client session is closed")]
    Closed,
}

impl NewsApiError {
    /// HTTP status code, for status failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            NewsApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
