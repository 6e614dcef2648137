//! Route graph error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoutesError {
    #[error("failed to read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse {0}: {1}")]
    Parse(PathBuf, #[source] serde_json::Error),
}
