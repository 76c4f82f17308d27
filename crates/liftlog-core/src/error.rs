//! Error types for liftlog-core

use thiserror::Error;

use crate::gateway::GatewayError;

/// Core error type for liftlog operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is invalid
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Submission gateway or workout source failure
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Text could not be parsed into a domain value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Filesystem errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a parse error
    #[must_use]
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse(reason.into())
    }

    /// Create an invalid config error
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }
}

/// Result type alias for liftlog-core operations
pub type Result<T> = std::result::Result<T, Error>;
