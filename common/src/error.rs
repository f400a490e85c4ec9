//! Error types for the venue listing core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A query-string value that does not fit its registered facet type.
///
/// Never fails a whole decode: the offending value is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("facet `{key}` expects a number, got `{value}`")]
    NotANumber { key: String, value: String },

    #[error("facet `{key}` got a non-finite number `{value}`")]
    NotFinite { key: String, value: String },

    #[error("range facet `{key}` only takes its bound keys")]
    BareRangeKey { key: String },
}

/// The search executor call failed or answered with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("search executor returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("search executor request failed: {0}")]
    Request(String),

    #[error("invalid search executor response: {0}")]
    InvalidResponse(String),
}

/// User-visible error surfaced by the listing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    FetchFailed,
}

impl ErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            Self::FetchFailed => "Failed to load results",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
