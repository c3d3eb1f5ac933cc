//! Mail error types.

use std::fmt;
use thiserror::Error;

/// Result type for mail operations.
pub type Result<T> = std::result::Result<T, MailError>;

/// Classification of a failure to reach the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The target URL could not be constructed.
    MalformedUrl,
    /// The request failed before a response was obtained.
    Io,
}

impl TransportErrorKind {
    /// Short tag used in rendered outcomes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedUrl => "Malformed URL",
            Self::Io => "IO",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mail errors.
#[derive(Debug, Error)]
pub enum MailError {
    /// A header bag value does not have the shape its key requires.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A form field could not be encoded; the field is omitted.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The provider rejected the request.
    #[error("{}", .errors.join(", "))]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Provider error strings, in the order they were reported.
        errors: Vec<String>,
    },

    /// The provider could not be reached.
    #[error("{kind} - {message}")]
    Transport {
        /// What went wrong.
        kind: TransportErrorKind,
        /// Underlying error message.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MailError {
    /// Create a malformed-URL transport error.
    pub fn malformed_url(message: impl Into<String>) -> Self {
        Self::Transport {
            kind: TransportErrorKind::MalformedUrl,
            message: message.into(),
        }
    }

    /// Create an I/O transport error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Transport {
            kind: TransportErrorKind::Io,
            message: message.into(),
        }
    }

    /// Check if the provider rejected the request.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Check if the provider could not be reached.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Provider error strings, if this is a rejection.
    pub fn provider_errors(&self) -> Option<&[String]> {
        match self {
            Self::Rejected { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Transport failure kind, if this is a transport error.
    pub fn transport_kind(&self) -> Option<TransportErrorKind> {
        match self {
            Self::Transport { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MailError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for MailError {
    fn from(err: url::ParseError) -> Self {
        Self::malformed_url(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<gridpost_http_client::HttpClientError> for MailError {
    fn from(err: gridpost_http_client::HttpClientError) -> Self {
        if err.is_invalid_url() {
            Self::malformed_url(err.to_string())
        } else {
            Self::io(err.to_string())
        }
    }
}
