//! HTTP Client error types.

use thiserror::Error;

/// Result type for HTTP client operations.
pub type Result<T> = std::result::Result<T, HttpClientError>;

/// HTTP client errors.
///
/// An error status from the server is not one of these; it comes back as a
/// [`Response`](crate::Response).
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The request URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Underlying HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl HttpClientError {
    /// Check if the request never left the client because its URL was unusable.
    ///
    /// Covers URLs that do not parse as well as parsed URLs the client refuses
    /// to build a request for, such as an unsupported scheme.
    pub fn is_invalid_url(&self) -> bool {
        match self {
            Self::InvalidUrl(_) => true,
            Self::Http(e) => e.is_builder(),
        }
    }
}
