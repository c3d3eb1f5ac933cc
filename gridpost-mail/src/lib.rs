//! # Gridpost Mail
//!
//! Transactional email through the SendGrid web API (`api/mail.send.json`).
//!
//! ## Features
//!
//! - **Message builder**: recipients, content and SMTP-API metadata
//!   (categories, substitutions, sections, unique arguments, filters)
//! - **Two encodings**: recipients either as plain `to[]` form fields or
//!   inside the JSON `x-smtpapi` sidecar field
//! - **Outcome classification**: success, provider rejection, or transport
//!   failure, each distinguishable
//! - **Pluggable transport**: HTTP by default, any [`Transport`] for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gridpost_mail::{Credentials, SendGrid, SendGridConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sendgrid = SendGrid::new(SendGridConfig::from_env()?)?;
//!
//!     let mut message = Credentials::from_env()?.message();
//!     message
//!         .set_from("sender@example.com")
//!         .add_to("recipient@example.com", "Recipient")
//!         .set_subject("Hello from gridpost")
//!         .set_text("This is a test email.")
//!         .add_category("welcome");
//!
//!     sendgrid.send(&message).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Observing Problems
//!
//! ```rust,ignore
//! use gridpost_mail::MailError;
//!
//! let listener = |response: &str, error: Option<&MailError>| {
//!     eprintln!("send problem: {} ({:?})", response, error);
//! };
//! sendgrid.send_with_listener(&message, &listener).await?;
//! ```

mod config;
mod encoding;
mod error;
mod header;
mod listener;
mod message;
mod mode;
mod recipient;
mod sendgrid;
mod transport;

pub use config::{Credentials, SendGridConfig, DEFAULT_BASE_URL, DEFAULT_ENDPOINT};
pub use encoding::{
    array_pairs, bcc_query, encode_component, prepare_message_data, FormData, FormValue,
    SMTPAPI_FIELD,
};
pub use error::{MailError, Result, TransportErrorKind};
pub use header::{escape_non_ascii, FilterSettings, SmtpApiHeader};
pub use listener::{TracingListener, WarningListener};
pub use message::{Message, DEFAULT_CATEGORY};
pub use mode::use_headers;
pub use recipient::Recipient;
pub use sendgrid::{PreparedRequest, SendGrid, SUCCESS};
pub use transport::{Transport, TransportResponse};

#[cfg(feature = "http")]
pub use transport::HttpTransport;

/// Prelude for common imports.
///
/// ```
/// use gridpost_mail::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Credentials, SendGridConfig};
    pub use crate::error::{MailError, Result, TransportErrorKind};
    pub use crate::header::{FilterSettings, SmtpApiHeader};
    pub use crate::listener::{TracingListener, WarningListener};
    pub use crate::message::Message;
    pub use crate::recipient::Recipient;
    pub use crate::sendgrid::{SendGrid, SUCCESS};
    pub use crate::transport::{Transport, TransportResponse};

    #[cfg(feature = "http")]
    pub use crate::transport::HttpTransport;
}
