//! Error types for Xinde API client operations.

use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Error types surfaced by the client
///
/// Signing itself never fails; every variant here comes from input
/// validation, configuration, or the HTTP exchange.
#[derive(Error, Debug, miette::Diagnostic)]
pub enum ClientError {
    /// The request never produced an HTTP response (DNS, TLS, connect, timeout).
    #[error("Transport error: {0}")]
    #[diagnostic(code(xinde::transport))]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Unexpected response: HTTP {status}")]
    #[diagnostic(code(xinde::unexpected_response))]
    UnexpectedResponse { status: u16, body: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(help("run `xinde-client config init` to write a default configuration"))]
    ConfigurationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl ClientError {
    /// HTTP status code carried by the error, if the server responded at all.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::UnexpectedResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::Transport(error.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(error: std::io::Error) -> Self {
        ClientError::IoError(error.to_string())
    }
}
