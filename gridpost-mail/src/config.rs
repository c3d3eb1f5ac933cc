//! SendGrid configuration.

use std::env;
use std::fmt;
use std::time::Duration;

#[cfg(feature = "http")]
use gridpost_http_client::HttpClientConfig;

use crate::{MailError, Message, Result};

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://sendgrid.com/";

/// Path of the send endpoint, relative to the base URL.
pub const DEFAULT_ENDPOINT: &str = "api/mail.send.json";

/// Where and how the send engine reaches the provider.
#[derive(Debug, Clone)]
pub struct SendGridConfig {
    /// API host, with a trailing slash.
    pub base_url: String,
    /// Send endpoint, joined onto `base_url`.
    pub endpoint: String,
    /// Request timeout handed to the HTTP transport.
    pub timeout: Duration,
}

impl Default for SendGridConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl SendGridConfig {
    /// Create the production configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL (for testing).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a custom endpoint path.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load overrides from the environment, reading `.env` first if present.
    ///
    /// - `SENDGRID_BASE_URL`
    /// - `SENDGRID_ENDPOINT`
    /// - `SENDGRID_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(base_url) = env::var("SENDGRID_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(endpoint) = env::var("SENDGRID_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(secs) = env::var("SENDGRID_TIMEOUT_SECS") {
            let secs = secs.parse::<u64>().map_err(|e| {
                MailError::Config(format!("SENDGRID_TIMEOUT_SECS `{}`: {}", secs, e))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// HTTP client settings matching this configuration.
    #[cfg(feature = "http")]
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig::default().timeout(self.timeout)
    }
}

/// The two opaque API credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API user.
    pub api_user: String,
    /// API key.
    pub api_key: String,
}

impl Credentials {
    /// Create credentials.
    pub fn new(api_user: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_user: api_user.into(),
            api_key: api_key.into(),
        }
    }

    /// Read `SENDGRID_API_USER` and `SENDGRID_API_KEY`, loading `.env` first
    /// if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self::new(required_var("SENDGRID_API_USER")?, required_var("SENDGRID_API_KEY")?))
    }

    /// Start a message sent with these credentials.
    pub fn message(&self) -> Message {
        Message::new(self.api_user.clone(), self.api_key.clone())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_user", &self.api_user)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

fn required_var(key: &str) -> Result<String> {
    env::var(key).map_err(|e| MailError::Config(format!("{}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SendGridConfig::new();
        assert_eq!(config.base_url, "https://sendgrid.com/");
        assert_eq!(config.endpoint, "api/mail.send.json");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_builder() {
        let config = SendGridConfig::new()
            .base_url("http://127.0.0.1:8080/")
            .endpoint("v2/send")
            .timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "http://127.0.0.1:8080/");
        assert_eq!(config.endpoint, "v2/send");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_client_config_carries_timeout() {
        let config = SendGridConfig::new().timeout(Duration::from_secs(7));
        assert_eq!(config.http_client_config().timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_missing_required_var() {
        let err = required_var("GRIDPOST_SURELY_UNSET_VAR_12345").unwrap_err();
        assert!(matches!(err, MailError::Config(_)));
        assert!(err.to_string().contains("GRIDPOST_SURELY_UNSET_VAR_12345"));
    }

    #[test]
    fn test_credentials_start_message() {
        let credentials = Credentials::new("user", "secret");
        let message = credentials.message();
        assert_eq!(message.api_user(), "user");
        assert_eq!(message.api_key(), "secret");
        assert!(!format!("{:?}", credentials).contains("secret"));
    }
}
