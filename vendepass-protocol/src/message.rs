//! JSON envelope types for action requests and responses.

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Action names understood by the vendepass server.
pub mod actions {
    pub const LOGIN: &str = "login";
    pub const LOGOUT: &str = "logout";
}

/// Field names used inside `Data` by the session actions.
pub mod fields {
    pub const USERNAME: &str = "Username";
    pub const PASSWORD: &str = "Password";
    pub const TOKEN_ID: &str = "TokenId";
    pub const TOKEN: &str = "token";
}

/// Request message envelope.
///
/// Serializes to `{"Action": <action>, "Data": {...}}`. The optional `Auth`
/// token is only written when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRequest")]
pub struct RequestEnvelope {
    /// Operation identifier, e.g. `login`.
    #[serde(rename = "Action")]
    action: String,

    /// Operation-specific parameters.
    #[serde(rename = "Data", default)]
    data: Map<String, Value>,

    /// Session token for actions that require one.
    #[serde(rename = "Auth", default, skip_serializing_if = "Option::is_none")]
    auth: Option<String>,
}

impl RequestEnvelope {
    /// Creates a new envelope. The action must be non-empty.
    pub fn new(action: impl Into<String>, data: Map<String, Value>) -> Result<Self, ProtocolError> {
        let action = action.into();
        if action.is_empty() {
            return Err(ProtocolError::EmptyAction);
        }
        Ok(Self {
            action,
            data,
            auth: None,
        })
    }

    pub fn with_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(token.into());
        self
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn auth(&self) -> Option<&str> {
        self.auth.as_deref()
    }
}

/// Wire shape of a request before the action is validated.
#[derive(Deserialize)]
struct RawRequest {
    #[serde(rename = "Action")]
    action: String,
    #[serde(rename = "Data", default)]
    data: Map<String, Value>,
    #[serde(rename = "Auth", default)]
    auth: Option<String>,
}

impl TryFrom<RawRequest> for RequestEnvelope {
    type Error = ProtocolError;

    fn try_from(raw: RawRequest) -> Result<Self, Self::Error> {
        let mut request = Self::new(raw.action, raw.data)?;
        request.auth = raw.auth;
        Ok(request)
    }
}

/// Response message envelope.
///
/// The server is free to put any fields at the top level, so the document is
/// kept as-is. By convention successful responses carry a `Data` mapping and
/// failed ones a non-empty `Error` string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseEnvelope(Map<String, Value>);

impl ResponseEnvelope {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the `Data` mapping, if present and a mapping.
    pub fn data(&self) -> Option<&Map<String, Value>> {
        self.0.get("Data").and_then(Value::as_object)
    }

    /// Returns `Data.token` when it is a non-empty string.
    pub fn token(&self) -> Option<&str> {
        self.data()
            .and_then(|data| data.get(fields::TOKEN))
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
    }

    /// Returns the server-reported `Error` message, if any.
    pub fn error(&self) -> Option<&str> {
        self.0
            .get("Error")
            .and_then(Value::as_str)
            .filter(|msg| !msg.is_empty())
    }

    pub fn is_error(&self) -> bool {
        self.error().is_some()
    }

    /// Returns the envelope as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for ResponseEnvelope {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
