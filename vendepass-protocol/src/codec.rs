//! Encoder and decoder for the unframed JSON wire format.
//!
//! Envelopes travel as bare UTF-8 JSON documents: no length prefix, no
//! trailing delimiter. The receiving side is expected to hold exactly one
//! document in the bytes handed to the decoder.

use crate::error::ProtocolError;
use crate::message::{RequestEnvelope, ResponseEnvelope};
use bytes::Bytes;

/// Encodes envelopes into wire bytes.
pub struct Encoder;

impl Encoder {
    /// Encodes a request envelope.
    pub fn encode_request(request: &RequestEnvelope) -> Result<Bytes, ProtocolError> {
        Self::encode_json(request)
    }

    /// Encodes a response envelope.
    pub fn encode_response(response: &ResponseEnvelope) -> Result<Bytes, ProtocolError> {
        Self::encode_json(response)
    }

    fn encode_json<T: serde::Serialize>(value: &T) -> Result<Bytes, ProtocolError> {
        Ok(Bytes::from(serde_json::to_vec(value)?))
    }
}

/// Decodes wire bytes into envelopes.
pub struct Decoder;

impl Decoder {
    /// Decodes a response envelope from the bytes of a single read.
    pub fn decode_response(payload: &[u8]) -> Result<ResponseEnvelope, ProtocolError> {
        let text = Self::payload_str(payload)?;
        Ok(serde_json::from_str(text)?)
    }

    /// Decodes a request envelope from the bytes of a single read.
    pub fn decode_request(payload: &[u8]) -> Result<RequestEnvelope, ProtocolError> {
        let text = Self::payload_str(payload)?;
        Ok(serde_json::from_str(text)?)
    }

    fn payload_str(payload: &[u8]) -> Result<&str, ProtocolError> {
        if payload.is_empty() {
            return Err(ProtocolError::EmptyPayload);
        }
        std::str::from_utf8(payload).map_err(|_| ProtocolError::InvalidUtf8)
    }
}
