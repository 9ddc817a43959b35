//! Client error types.
//!
//! Every protocol verb has its own failure variant carrying the HTTP status
//! and the raw body, except activation, which keeps the decoded per-message
//! diagnostics. Nothing is retried or recovered locally.

use adtkit_transport::{TransportError, UnsupportedMethod};
use adtkit_xml::XmlError;
use thiserror::Error;

use crate::session::SessionMode;
use crate::types::ActivationMessage;

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, AdtError>;

/// Errors returned by [`AdtClient`](crate::AdtClient) operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AdtError {
    /// Connectivity failure, surfaced unmodified.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A request used a method outside GET, POST, PUT and DELETE. Raised
    /// before any network I/O.
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    /// The response body was not well-formed XML.
    #[error("Malformed response: {message}")]
    MalformedResponse {
        /// Parser diagnostic
        message: String,
        /// Raw body as received
        body: String,
    },

    /// A lookup path could not be compiled.
    #[error(transparent)]
    Decoder(XmlError),

    /// Lock while already stateful, or unlock while stateless. Raised before
    /// any network I/O.
    #[error("Cannot {operation} while the session is {mode}")]
    InvalidSessionState {
        /// The rejected operation
        operation: &'static str,
        /// Session mode at the time of the call
        mode: SessionMode,
    },

    /// An object type tag that is not in the registry.
    #[error("Unknown object type `{0}`")]
    UnknownObjectType(String),

    /// A read-only call answered with a status other than the expected one.
    #[error("{operation} returned unexpected status {status}")]
    UnexpectedStatus {
        /// The operation
        operation: &'static str,
        /// HTTP status
        status: u16,
        /// Raw body
        body: String,
    },

    /// Login answered with a non-200 status.
    #[error("Login failed with status {status}")]
    LoginFailed {
        /// HTTP status
        status: u16,
        /// Raw body
        body: String,
    },

    /// Login answered 200 but without an `x-csrf-token` header.
    #[error("CSRF token not found in response headers")]
    TokenMissing,

    /// Reading source failed.
    #[error("Failed to get object source (status {status})")]
    GetSourceFailed {
        /// HTTP status
        status: u16,
        /// Raw body
        body: String,
    },

    /// The lock request was refused. The session mode is not touched unless
    /// the client's lock failure policy says so.
    #[error("Failed to lock object (status {status})")]
    LockFailed {
        /// HTTP status
        status: u16,
        /// Raw body
        body: String,
    },

    /// The unlock request was refused; the session stays stateful.
    #[error("Failed to unlock object (status {status})")]
    UnlockFailed {
        /// HTTP status
        status: u16,
        /// Raw body
        body: String,
    },

    /// Writing source failed.
    #[error("Failed to set object source (status {status})")]
    SetSourceFailed {
        /// HTTP status
        status: u16,
        /// Raw body
        body: String,
    },

    /// Neither activation nor generation was executed.
    #[error("Activation failed with status {status} ({} messages)", messages.len())]
    ActivationFailed {
        /// HTTP status
        status: u16,
        /// Per-message diagnostics as sent by the server
        messages: Vec<ActivationMessage>,
    },

    /// Deleting failed.
    #[error("Failed to delete object (status {status})")]
    DeleteFailed {
        /// HTTP status
        status: u16,
        /// Raw body
        body: String,
    },

    /// Creating an object or include failed.
    #[error("Failed to create object (status {status})")]
    CreateFailed {
        /// HTTP status
        status: u16,
        /// Raw body
        body: String,
    },

    /// The check run was refused.
    #[error("Failed to check syntax (status {status})")]
    SyntaxCheckFailed {
        /// HTTP status
        status: u16,
        /// Raw body
        body: String,
    },

    /// The unit test run was refused.
    #[error("Failed to run unit tests (status {status})")]
    UnitTestRunFailed {
        /// HTTP status
        status: u16,
        /// Raw body
        body: String,
    },

    /// Pretty printing or storing pretty printer settings failed.
    #[error("Failed to pretty print (status {status})")]
    PrettyPrintFailed {
        /// HTTP status
        status: u16,
        /// Raw body
        body: String,
    },

    /// Reading the object structure failed.
    #[error("Failed to get object structure (status {status})")]
    ObjectStructureFailed {
        /// HTTP status
        status: u16,
        /// Raw body
        body: String,
    },
}

impl AdtError {
    /// HTTP status of a protocol failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. }
            | Self::LoginFailed { status, .. }
            | Self::GetSourceFailed { status, .. }
            | Self::LockFailed { status, .. }
            | Self::UnlockFailed { status, .. }
            | Self::SetSourceFailed { status, .. }
            | Self::ActivationFailed { status, .. }
            | Self::DeleteFailed { status, .. }
            | Self::CreateFailed { status, .. }
            | Self::SyntaxCheckFailed { status, .. }
            | Self::UnitTestRunFailed { status, .. }
            | Self::PrettyPrintFailed { status, .. }
            | Self::ObjectStructureFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw body attached to the failure, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::MalformedResponse { body, .. }
            | Self::UnexpectedStatus { body, .. }
            | Self::LoginFailed { body, .. }
            | Self::GetSourceFailed { body, .. }
            | Self::LockFailed { body, .. }
            | Self::UnlockFailed { body, .. }
            | Self::SetSourceFailed { body, .. }
            | Self::DeleteFailed { body, .. }
            | Self::CreateFailed { body, .. }
            | Self::SyntaxCheckFailed { body, .. }
            | Self::UnitTestRunFailed { body, .. }
            | Self::PrettyPrintFailed { body, .. }
            | Self::ObjectStructureFailed { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Whether the failure happened below HTTP (connect, timeout, ...).
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<XmlError> for AdtError {
    fn from(err: XmlError) -> Self {
        match err {
            XmlError::Malformed { message, body } => Self::MalformedResponse { message, body },
            other => Self::Decoder(other),
        }
    }
}

impl From<UnsupportedMethod> for AdtError {
    fn from(err: UnsupportedMethod) -> Self {
        Self::UnsupportedMethod(err.0)
    }
}
