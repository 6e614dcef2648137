//! Connection management.
//!
//! A [`Connection`] lives for exactly one request/response cycle: open,
//! send one envelope, perform one bounded read, close.

use crate::error::{ClientError, TimeoutStage};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use vendepass_protocol::{
    Decoder, Encoder, RequestEnvelope, ResponseEnvelope, DEFAULT_HOST, DEFAULT_PORT,
    RESPONSE_BUFFER_SIZE,
};

/// Default read buffer size (2 KiB), the largest response a single exchange accepts.
pub const DEFAULT_READ_BUFFER_SIZE: usize = RESPONSE_BUFFER_SIZE;

/// Minimum read buffer size (512 B).
pub const MIN_READ_BUFFER_SIZE: usize = 512;

/// Maximum read buffer size (1 MiB).
pub const MAX_READ_BUFFER_SIZE: usize = 1024 * 1024;

/// Connection configuration.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Server host name or IP address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Timeout for the single response read.
    pub receive_timeout: Duration,
    /// Size of the single response read. Larger responses are truncated.
    pub read_buffer_size: usize,
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: Duration::from_secs(10),
            receive_timeout: Duration::from_secs(30),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }

    pub fn from_addr(addr: SocketAddr) -> Self {
        Self::new(addr.ip().to_string(), addr.port())
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = timeout;
        self
    }

    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.clamp(MIN_READ_BUFFER_SIZE, MAX_READ_BUFFER_SIZE);
        self
    }

    /// Returns `host:port` for display.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

/// A single-use connection to a vendepass server.
pub struct Connection {
    stream: TcpStream,
    receive_timeout: Duration,
    read_buffer_size: usize,
}

impl Connection {
    /// Opens a new connection to the configured server.
    pub async fn open(config: &ConnectionConfig) -> Result<Self, ClientError> {
        tracing::debug!("Connecting to {}...", config.address());

        let stream = tokio::time::timeout(
            config.connect_timeout,
            TcpStream::connect((config.host.as_str(), config.port)),
        )
        .await
        .map_err(|_| {
            tracing::debug!("Connection timeout");
            ClientError::Timeout {
                stage: TimeoutStage::Connect,
            }
        })?
        .map_err(|e| {
            tracing::debug!("Connection failed: {}", e);
            ClientError::Connection(e)
        })?;

        stream.set_nodelay(true).ok();
        tracing::debug!("TCP connected to {}", config.address());

        Ok(Self {
            stream,
            receive_timeout: config.receive_timeout,
            read_buffer_size: config.read_buffer_size,
        })
    }

    /// Writes a request envelope in full.
    pub async fn send(&mut self, request: &RequestEnvelope) -> Result<(), ClientError> {
        let encoded = Encoder::encode_request(request).map_err(ClientError::InvalidRequest)?;

        self.stream
            .write_all(&encoded)
            .await
            .map_err(ClientError::Transport)?;
        self.stream.flush().await.map_err(ClientError::Transport)?;

        tracing::debug!(
            "Request action={} sent ({} bytes)",
            request.action(),
            encoded.len()
        );
        Ok(())
    }

    /// Performs one bounded read and decodes it as a response envelope.
    ///
    /// This is a single read, not a read-until-close: bytes past the buffer
    /// are never consumed, so an oversized response fails to decode.
    pub async fn receive(&mut self) -> Result<ResponseEnvelope, ClientError> {
        let mut buf = vec![0u8; self.read_buffer_size];

        let n = tokio::time::timeout(self.receive_timeout, self.stream.read(&mut buf))
            .await
            .map_err(|_| {
                tracing::debug!("Read timeout");
                ClientError::Timeout {
                    stage: TimeoutStage::Receive,
                }
            })?
            .map_err(ClientError::Transport)?;

        tracing::debug!("Read {} bytes from socket", n);
        if n == buf.len() {
            tracing::warn!(
                "Response filled the {} byte read buffer and may be truncated",
                buf.len()
            );
        }

        Decoder::decode_response(&buf[..n]).map_err(|e| {
            tracing::debug!("Failed to decode response: {}", e);
            ClientError::Decode(e)
        })
    }

    /// Sends a request and reads its response.
    pub async fn round_trip(
        &mut self,
        request: &RequestEnvelope,
    ) -> Result<ResponseEnvelope, ClientError> {
        self.send(request).await?;
        self.receive().await
    }

    /// Closes the connection.
    pub async fn close(mut self) {
        tracing::debug!("Closing connection");
        let _ = self.stream.shutdown().await;
    }
}
