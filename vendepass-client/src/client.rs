//! High-level client API.

use crate::connection::{Connection, ConnectionConfig};
use crate::error::ClientError;
use serde_json::{Map, Value};
use vendepass_protocol::message::{actions, fields};
use vendepass_protocol::{RequestEnvelope, ResponseEnvelope};

/// High-level client for a vendepass server.
///
/// The client holds no connection of its own: every call opens a fresh
/// connection, performs one exchange and closes it before returning. A
/// `Client` can therefore be cloned and used from several tasks at once.
#[derive(Debug, Clone, Default)]
pub struct Client {
    config: ConnectionConfig,
}

impl Client {
    /// Creates a new client with the given configuration.
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Performs one request/response exchange.
    pub async fn exchange(
        &self,
        action: &str,
        data: Map<String, Value>,
    ) -> Result<ResponseEnvelope, ClientError> {
        let request = RequestEnvelope::new(action, data).map_err(ClientError::InvalidRequest)?;
        self.send(&request).await
    }

    /// Performs one exchange with a session token attached as `Auth`.
    pub async fn exchange_with_auth(
        &self,
        action: &str,
        data: Map<String, Value>,
        auth: &str,
    ) -> Result<ResponseEnvelope, ClientError> {
        let request = RequestEnvelope::new(action, data)
            .map_err(ClientError::InvalidRequest)?
            .with_auth(auth);
        self.send(&request).await
    }

    /// Sends a prepared envelope over a fresh connection.
    ///
    /// The connection is closed whether or not the exchange succeeds.
    pub async fn send(&self, request: &RequestEnvelope) -> Result<ResponseEnvelope, ClientError> {
        let mut conn = Connection::open(&self.config).await?;
        let result = conn.round_trip(request).await;
        conn.close().await;

        match &result {
            Ok(_) => tracing::debug!("Exchange action={} completed", request.action()),
            Err(e) => tracing::debug!("Exchange action={} failed: {}", request.action(), e),
        }
        result
    }

    // =========================================================================
    // Session operations
    // =========================================================================

    /// Logs in with a username and password.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<ResponseEnvelope, ClientError> {
        let mut data = Map::new();
        data.insert(fields::USERNAME.to_string(), Value::from(username));
        data.insert(fields::PASSWORD.to_string(), Value::from(password));
        self.exchange(actions::LOGIN, data).await
    }

    /// Logs out the session identified by `token`.
    pub async fn logout(&self, token: &str) -> Result<ResponseEnvelope, ClientError> {
        let mut data = Map::new();
        data.insert(fields::TOKEN_ID.to_string(), Value::from(token));
        self.exchange(actions::LOGOUT, data).await
    }
}
