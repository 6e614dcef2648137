//! # vendepass-protocol
//!
//! Wire protocol for the vendepass action server.
//!
//! This crate provides:
//! - Request/Response envelope types (`{"Action": ..., "Data": {...}}`)
//! - The unframed JSON codec used on the wire
//! - Protocol error types and constants
//!
//! Requests are written as raw JSON bytes with no length prefix or
//! delimiter. Responses are read with a single bounded read, so a response
//! larger than the reader's buffer arrives truncated and fails to decode.

pub mod codec;
pub mod error;
pub mod message;

pub use codec::{Decoder, Encoder};
pub use error::ProtocolError;
pub use message::{actions, RequestEnvelope, ResponseEnvelope};

/// Default server host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8080;

/// Size of the single response read performed per exchange.
pub const RESPONSE_BUFFER_SIZE: usize = 2048;
