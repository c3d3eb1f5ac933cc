//! Observers for conditions reported during a send.

use tracing::warn;

use crate::MailError;

/// Receives non-fatal conditions and final errors of a send without
/// interrupting it.
///
/// Closures taking `(&str, Option<&MailError>)` implement this trait.
pub trait WarningListener: Send + Sync {
    /// Called with a human-readable summary and, when available, the error.
    fn warning(&self, response: &str, error: Option<&MailError>);
}

impl<F> WarningListener for F
where
    F: Fn(&str, Option<&MailError>) + Send + Sync,
{
    fn warning(&self, response: &str, error: Option<&MailError>) {
        self(response, error)
    }
}

/// Listener used when the caller supplies none: logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl WarningListener for TracingListener {
    fn warning(&self, response: &str, error: Option<&MailError>) {
        match error {
            Some(error) => warn!(response = %response, error = %error, "SendGrid send reported a problem"),
            None => warn!(response = %response, "SendGrid send reported a problem"),
        }
    }
}
