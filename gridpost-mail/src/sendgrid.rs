//! SendGrid web API send engine.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::encoding::{bcc_query, prepare_message_data, FormData};
use crate::{
    MailError, Message, Result, SendGridConfig, TracingListener, Transport, TransportResponse,
    WarningListener,
};

/// Server response recorded after a successful send.
pub const SUCCESS: &str = "success";

/// A fully serialized send request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// Target URL, carrying the bcc list in its query.
    pub url: Url,
    /// Form fields.
    pub form: FormData,
}

impl PreparedRequest {
    /// The encoded request body.
    pub fn body(&self) -> String {
        self.form.encode()
    }
}

/// Sends [`Message`]s through the SendGrid web API.
///
/// One POST per send, never retried. The outcome is returned and also kept
/// as a string, readable through [`server_response`](Self::server_response).
pub struct SendGrid {
    config: SendGridConfig,
    transport: Arc<dyn Transport>,
    server_response: Mutex<String>,
}

impl SendGrid {
    /// Create an engine posting over HTTP.
    #[cfg(feature = "http")]
    pub fn new(config: SendGridConfig) -> Result<Self> {
        let transport = crate::HttpTransport::new(config.http_client_config())?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create an engine posting through a custom transport.
    pub fn with_transport(config: SendGridConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
            server_response: Mutex::new(String::new()),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SendGridConfig {
        &self.config
    }

    /// Outcome of the last send: [`SUCCESS`], the provider's errors joined
    /// with `", "`, or the transport failure. Empty before the first send.
    pub fn server_response(&self) -> String {
        self.server_response.lock().clone()
    }

    /// Send endpoint URL, with `bcc[]` query pairs when `bccs` is non-empty.
    pub fn endpoint_url(&self, bccs: &[String]) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)?.join(&self.config.endpoint)?;
        url.set_query(bcc_query(bccs).as_deref());
        Ok(url)
    }

    /// Serialize `message` without sending it.
    pub fn prepare(&self, message: &Message, listener: &dyn WarningListener) -> Result<PreparedRequest> {
        let url = self.endpoint_url(message.bccs())?;
        let form = prepare_message_data(message, listener);
        Ok(PreparedRequest { url, form })
    }

    /// Send `message`, logging problems through `tracing`.
    pub async fn send(&self, message: &Message) -> Result<()> {
        self.send_with_listener(message, &TracingListener).await
    }

    /// Send `message`, reporting warnings and the final error to `listener`.
    pub async fn send_with_listener(
        &self,
        message: &Message,
        listener: &dyn WarningListener,
    ) -> Result<()> {
        debug!(
            recipients = message.recipients().len(),
            bcc = message.bccs().len(),
            use_headers = message.use_headers(),
            subject = ?message.subject(),
            "Sending email via SendGrid"
        );

        let result = self.transmit(message, listener).await;

        let response = match &result {
            Ok(()) => SUCCESS.to_string(),
            Err(e) => e.to_string(),
        };
        *self.server_response.lock() = response.clone();

        match &result {
            Ok(()) => debug!("Email sent successfully via SendGrid"),
            Err(e) => listener.warning(&response, Some(e)),
        }
        result
    }

    async fn transmit(&self, message: &Message, listener: &dyn WarningListener) -> Result<()> {
        let request = self.prepare(message, listener)?;
        debug!(url = %request.url, "Posting to SendGrid");
        let response = self.transport.post_form(&request.url, request.body()).await?;
        classify(response)
    }
}

/// Map a provider response onto the send outcome.
fn classify(response: TransportResponse) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        Err(MailError::Rejected {
            status: response.status,
            errors: provider_errors(response.status, &response.body),
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    errors: Vec<Value>,
}

/// Extract the `errors` array of an error payload.
///
/// Anything that is not such a payload still yields one error string, so a
/// rejection is never reported without a reason.
fn provider_errors(status: u16, body: &str) -> Vec<String> {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed
            .errors
            .into_iter()
            .map(|error| match error {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Err(_) => {
            let body = body.trim();
            if body.is_empty() {
                vec![format!("HTTP {}", status)]
            } else {
                vec![body.to_string()]
            }
        }
    }
}
