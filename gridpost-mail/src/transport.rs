//! The transport capability the send engine posts through.

use async_trait::async_trait;
use url::Url;

use crate::Result;

/// Status and body of a provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Full response body.
    pub body: String,
}

impl TransportResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check if the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Posts a form-encoded body and returns the provider's answer.
///
/// Implementations return `Err` only when no response was obtained
/// ([`MailError::Transport`](crate::MailError::Transport)); an error status
/// is a successful call.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` (`application/x-www-form-urlencoded`) to `url`.
    async fn post_form(&self, url: &Url, body: String) -> Result<TransportResponse>;
}

#[cfg(feature = "http")]
pub use http_transport::HttpTransport;

#[cfg(feature = "http")]
mod http_transport {
    use async_trait::async_trait;
    use gridpost_http_client::{HttpClient, HttpClientConfig};
    use tracing::debug;
    use url::Url;

    use super::{Transport, TransportResponse};
    use crate::Result;

    /// Transport backed by [`gridpost_http_client::HttpClient`].
    #[derive(Clone)]
    pub struct HttpTransport {
        client: HttpClient,
    }

    impl HttpTransport {
        /// Create a transport with its own client.
        pub fn new(config: HttpClientConfig) -> Result<Self> {
            Ok(Self {
                client: HttpClient::new(config)?,
            })
        }

        /// Wrap an existing client.
        pub fn with_client(client: HttpClient) -> Self {
            Self { client }
        }

        /// Get the underlying client.
        pub fn client(&self) -> &HttpClient {
            &self.client
        }
    }

    #[async_trait]
    impl Transport for HttpTransport {
        async fn post_form(&self, url: &Url, body: String) -> Result<TransportResponse> {
            let response = self
                .client
                .post(url.as_str())
                .form_encoded(body)
                .send()
                .await?;

            let status = response.status().as_u16();
            debug!(status, "Received provider response");

            Ok(TransportResponse::new(status, response.text_lossy()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_response_success_range() {
        assert!(TransportResponse::new(200, "").is_success());
        assert!(TransportResponse::new(204, "").is_success());
        assert!(!TransportResponse::new(301, "").is_success());
        assert!(!TransportResponse::new(400, "").is_success());
        assert!(!TransportResponse::new(500, "").is_success());
    }
}
