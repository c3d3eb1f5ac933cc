//! HTTP client implementation.

use std::sync::Arc;
use tracing::debug;

use crate::{FormRequest, HttpClientConfig, Response, Result};

/// HTTP client with configured timeouts and user agent.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: Arc<HttpClientConfig>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Start a form POST to an absolute URL.
    pub fn post(&self, url: impl Into<String>) -> FormRequest<'_> {
        FormRequest::new(self, url.into())
    }

    pub(crate) fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    /// Execute a request once and buffer the full response.
    pub(crate) async fn execute(&self, request: reqwest::Request) -> Result<Response> {
        debug!(method = %request.method(), url = %request.url(), "Executing request");
        let response = self.inner.execute(request).await?;
        Response::from_reqwest(response).await
    }
}
