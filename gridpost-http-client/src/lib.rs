//! # Gridpost HTTP Client
//!
//! A small HTTP client on top of `reqwest` that posts pre-encoded
//! `application/x-www-form-urlencoded` bodies and buffers the answer.
//!
//! ## Features
//!
//! - **Configurable**: request and connect timeouts, user agent
//! - **Buffered responses**: the whole body is read before the call returns
//! - **Verbatim form bodies**: repeated `key[]=` pairs survive untouched
//! - **Compression**: Automatic gzip/brotli support
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gridpost_http_client::{HttpClient, HttpClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new(HttpClientConfig::default())?;
//!
//!     let response = client
//!         .post("https://sendgrid.com/api/mail.send.json")
//!         .form_encoded("api_user=me&api_key=secret")
//!         .send()
//!         .await?;
//!
//!     println!("Status: {}", response.status());
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;

pub use client::HttpClient;
pub use config::HttpClientConfig;
pub use error::{HttpClientError, Result};
pub use request::FormRequest;
pub use response::Response;

// Re-export common types
pub use http::StatusCode;

/// Prelude for common imports.
///
/// ```
/// use gridpost_http_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::HttpClient;
    pub use crate::config::HttpClientConfig;
    pub use crate::error::{HttpClientError, Result};
    pub use crate::request::FormRequest;
    pub use crate::response::Response;
    pub use http::StatusCode;
}
