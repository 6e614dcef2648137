//! # vendepass-client
//!
//! Client library for the vendepass action server.
//!
//! This crate provides:
//! - One connection per request/response exchange, released on every path
//! - Configurable connect and receive timeouts
//! - High-level `login` / `logout` helpers and the login→logout session flow
//! - File and environment configuration

pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod session;

pub use client::Client;
pub use config::{Config, ConfigError};
pub use connection::{Connection, ConnectionConfig};
pub use error::{ClientError, ErrorKind, TimeoutStage};
pub use session::{run_session, Credentials, SessionOutcome};

#[cfg(test)]
mod testing;
