//! Client error types.

use std::fmt;
use thiserror::Error;
use vendepass_protocol::ProtocolError;

/// Stage of an exchange that ran out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutStage {
    Connect,
    Receive,
}

impl fmt::Display for TimeoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeoutStage::Connect => write!(f, "connect"),
            TimeoutStage::Receive => write!(f, "receive"),
        }
    }
}

/// Client errors.
///
/// Every variant is terminal for the exchange that raised it; the client
/// never retries.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("connection error: {0}")]
    Connection(#[source] std::io::Error),

    #[error("transport error: {0}")]
    Transport(#[source] std::io::Error),

    #[error("decode error: {0}")]
    Decode(#[source] ProtocolError),

    #[error("{stage} timed out")]
    Timeout { stage: TimeoutStage },

    #[error("invalid request: {0}")]
    InvalidRequest(#[source] ProtocolError),
}

/// Payload-free tag for [`ClientError`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    Transport,
    Decode,
    Timeout,
    InvalidRequest,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Connection(_) => ErrorKind::Connection,
            ClientError::Transport(_) => ErrorKind::Transport,
            ClientError::Decode(_) => ErrorKind::Decode,
            ClientError::Timeout { .. } => ErrorKind::Timeout,
            ClientError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }
}
