//! Client configuration.
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Default values
//! 2. YAML config file (if specified via VENDEPASS_CONFIG)
//! 3. Environment variables

use crate::connection::{ConnectionConfig, DEFAULT_READ_BUFFER_SIZE};
use crate::session::Credentials;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use vendepass_protocol::{DEFAULT_HOST, DEFAULT_PORT};

/// Environment variable naming the YAML config file.
pub const CONFIG_ENV: &str = "VENDEPASS_CONFIG";

/// Client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server endpoint configuration.
    pub server: ServerConfig,
    /// Credentials used by the session driver.
    pub credentials: Credentials,
}

impl Config {
    /// Loads configuration from file, then applies environment variable overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            config = Self::from_file(&path)?;
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.server.apply_env_overrides();

        if let Ok(username) = std::env::var("VENDEPASS_USERNAME") {
            self.credentials.username = username;
        }
        if let Ok(password) = std::env::var("VENDEPASS_PASSWORD") {
            self.credentials.password = password;
        }
    }

    /// Builds the connection configuration for the client.
    pub fn connection(&self) -> ConnectionConfig {
        self.server.connection()
    }
}

/// Server endpoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host name or IP address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Receive timeout in seconds.
    pub read_timeout_secs: u64,
    /// Size of the single response read, in bytes.
    pub read_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout_secs: 10,
            read_timeout_secs: 30,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl ServerConfig {
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("VENDEPASS_HOST") {
            if !host.is_empty() {
                self.host = host;
            }
        }

        if let Ok(port) = std::env::var("VENDEPASS_PORT") {
            if let Ok(parsed) = port.parse() {
                self.port = parsed;
            }
        }

        if let Ok(timeout) = std::env::var("VENDEPASS_CONNECT_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.connect_timeout_secs = secs;
            }
        }

        if let Ok(timeout) = std::env::var("VENDEPASS_READ_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.read_timeout_secs = secs;
            }
        }

        if let Ok(size) = std::env::var("VENDEPASS_READ_BUFFER_SIZE") {
            if let Ok(n) = size.parse() {
                self.read_buffer_size = n;
            }
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig::new(self.host.clone(), self.port)
            .with_connect_timeout(self.connect_timeout())
            .with_receive_timeout(self.read_timeout())
            .with_read_buffer_size(self.read_buffer_size)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    IoError(PathBuf, std::io::Error),

    #[error("failed to parse config file {0}: {1}")]
    ParseError(PathBuf, String),
}
