//! Transport error types.

use std::time::Duration;
use thiserror::Error;

/// A specialized `Result` type for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Connectivity-level failures. HTTP status codes are never mapped here:
/// any response that arrives is handed back to the caller as-is.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum TransportError {
    /// Failed to establish a connection (DNS, refused, TLS handshake).
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request could not be sent or the connection dropped mid-flight.
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// The response body could not be read.
    #[error("Receive failed: {0}")]
    ReceiveFailed(String),

    /// Single request timed out.
    #[error(
        "Request timed out after {timeout:?} for operation: {operation}. \
         If this is expected, increase `HttpTransportConfig::timeout`"
    )]
    RequestTimeout {
        /// The request that timed out (`METHOD url`)
        operation: String,
        /// The timeout that was exceeded
        timeout: Duration,
    },

    /// A header name or value is not valid on the wire.
    #[error("Invalid header `{name}`")]
    InvalidHeader {
        /// The offending header name
        name: String,
    },

    /// The transport was configured with invalid parameters.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// An HTTP method outside of GET, POST, PUT and DELETE.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported method: {0}")]
pub struct UnsupportedMethod(pub String);

impl TransportError {
    /// Whether the failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RequestTimeout { .. })
    }

    pub(crate) fn from_reqwest(err: &reqwest::Error, operation: String, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::RequestTimeout { operation, timeout }
        } else if err.is_connect() {
            Self::ConnectionFailed(format!("{operation}: {err}"))
        } else if err.is_builder() {
            Self::ConfigurationError(format!("{operation}: {err}"))
        } else if err.is_body() || err.is_decode() {
            Self::ReceiveFailed(format!("{operation}: {err}"))
        } else {
            Self::SendFailed(format!("{operation}: {err}"))
        }
    }
}
