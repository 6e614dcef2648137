//! Protocol error types.

use thiserror::Error;

/// Protocol-level errors raised while building, encoding or decoding envelopes.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid UTF-8 in payload")]
    InvalidUtf8,

    #[error("empty response payload")]
    EmptyPayload,

    #[error("action must not be empty")]
    EmptyAction,
}

impl ProtocolError {
    /// Returns whether the error was caused by the payload being cut short.
    ///
    /// A response that overflows the read buffer is truncated mid-document,
    /// which surfaces as an unexpected end of input.
    pub fn is_truncated(&self) -> bool {
        match self {
            ProtocolError::Json(e) => e.is_eof(),
            _ => false,
        }
    }
}
