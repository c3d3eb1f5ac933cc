// Gridpost - transactional email through the SendGrid web API
//
// This crate re-exports the message builder and send engine, and, with the
// `http` feature, the HTTP client they post through.

// Re-export core functionality
pub use gridpost_mail::*;

// Re-export optional crates
#[cfg(feature = "http")]
pub use gridpost_http_client;
