//! Error handling for the registry session host
//!
//! Every failure becomes an `error` response line; the session keeps running.

use thiserror::Error;

use crate::protocol::Response;

/// Host error types
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed command: {0}")]
    MalformedCommand(String),

    #[error("Invalid business id: {0}")]
    InvalidId(String),

    #[error("Business not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HostError {
    pub fn code(&self) -> &'static str {
        match self {
            HostError::Configuration(_) => "CONFIGURATION_ERROR",
            HostError::Io(_) => "IO_ERROR",
            HostError::MalformedCommand(_) => "MALFORMED_COMMAND",
            HostError::InvalidId(_) => "INVALID_ID",
            HostError::NotFound(_) => "NOT_FOUND",
            HostError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Convert into the response line sent back to the view layer
    pub fn into_response(self) -> Response {
        tracing::warn!(code = self.code(), "Error: {}", self);

        Response::Error {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

/// Result type alias for host operations
pub type HostResult<T> = Result<T, HostError>;
