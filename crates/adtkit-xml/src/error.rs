//! XML decoding error types.

use thiserror::Error;

/// A specialized `Result` type for XML decoding.
pub type XmlResult<T> = std::result::Result<T, XmlError>;

/// Errors raised while decoding a response body or compiling a lookup path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum XmlError {
    /// The body is not well-formed XML. No partial recovery is attempted.
    #[error("Malformed XML response: {message}")]
    Malformed {
        /// Parser diagnostic
        message: String,
        /// The raw body that failed to parse
        body: String,
    },

    /// A path names a prefix that is not in the namespace table.
    #[error("Unknown namespace prefix `{prefix}` in path `{path}`")]
    UnknownPrefix {
        /// The unresolved prefix
        prefix: String,
        /// The full path as written by the caller
        path: String,
    },

    /// A path could not be parsed.
    #[error("Invalid path `{path}`: {reason}")]
    InvalidPath {
        /// The full path as written by the caller
        path: String,
        /// What was wrong with it
        reason: &'static str,
    },
}

impl XmlError {
    /// Returns the raw body for [`XmlError::Malformed`], if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Malformed { body, .. } => Some(body),
            _ => None,
        }
    }
}
