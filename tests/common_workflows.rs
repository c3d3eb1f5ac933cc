//! Integration tests for common Gridpost workflows.
//!
//! These tests drive the full send path through an in-memory transport.

use async_trait::async_trait;
use gridpost::*;
use std::sync::{Arc, Mutex};
use url::Url;

// =============================================================================
// Test Transport
// =============================================================================

/// Records every request and answers with a canned outcome.
#[derive(Clone)]
struct RecordingTransport {
    requests: Arc<Mutex<Vec<(Url, String)>>>,
    outcome: Arc<dyn Fn() -> Result<TransportResponse> + Send + Sync>,
}

impl RecordingTransport {
    fn responding(status: u16, body: &'static str) -> Self {
        Self {
            requests: Arc::default(),
            outcome: Arc::new(move || Ok(TransportResponse::new(status, body))),
        }
    }

    fn failing(error: fn() -> MailError) -> Self {
        Self {
            requests: Arc::default(),
            outcome: Arc::new(move || Err(error())),
        }
    }

    fn requests(&self) -> Vec<(Url, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn post_form(&self, url: &Url, body: String) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push((url.clone(), body));
        (self.outcome)()
    }
}

fn engine(transport: &RecordingTransport) -> SendGrid {
    SendGrid::with_transport(SendGridConfig::default(), transport.clone())
}

fn message() -> Message {
    let mut message = Message::new("user", "key");
    message
        .set_from("a@x.com")
        .set_to("b@x.com")
        .set_subject("S")
        .set_text("T");
    message
}

fn field<'a>(form: &'a FormData, name: &str) -> &'a str {
    form.text(name).unwrap()
}

// =============================================================================
// Encoding Mode Tests
// =============================================================================

#[test]
fn test_encoding_mode_matrix() {
    for bcc_count in [0, 1, 5] {
        assert!(use_headers(Some(true), bcc_count));
        assert!(!use_headers(Some(false), bcc_count));
    }
    assert!(!use_headers(None, 0));
    assert!(use_headers(None, 1));
}

#[test]
fn test_message_mode_follows_preference_and_bcc() {
    let mut message = message();
    assert!(message.use_headers());

    message.unset_use_headers();
    assert!(!message.use_headers());

    message.add_bcc("hidden@x.com");
    assert!(message.use_headers());

    message.set_use_headers(false);
    assert!(!message.use_headers());
}

// =============================================================================
// Serialization Tests
// =============================================================================

#[test]
fn test_default_message_uses_sidecar() {
    let sendgrid = engine(&RecordingTransport::responding(200, ""));
    let request = sendgrid.prepare(&message(), &TracingListener).unwrap();

    assert_eq!(field(&request.form, "to"), "a@x.com");
    let sidecar: serde_json::Value =
        serde_json::from_str(field(&request.form, SMTPAPI_FIELD)).unwrap();
    assert_eq!(
        sidecar,
        serde_json::json!({"category": ["gridpost"], "to": ["b@x.com"]})
    );
    assert_eq!(request.url.query(), None);
}

#[test]
fn test_plain_mode_fields() {
    let mut message = message();
    message.set_use_headers(false).add_to_email("c@x.com");

    let sendgrid = engine(&RecordingTransport::responding(200, ""));
    let request = sendgrid.prepare(&message, &TracingListener).unwrap();

    assert_eq!(
        request.form.list("to").unwrap(),
        ["b@x.com".to_string(), "c@x.com".to_string()]
    );
    assert!(!request.form.contains("toname"));
    assert!(!request.form.contains(SMTPAPI_FIELD));
    assert!(request.body().contains("to[]=b%40x.com&to[]=c%40x.com"));
}

#[test]
fn test_optional_fields_only_when_set() {
    let sendgrid = engine(&RecordingTransport::responding(200, ""));

    let request = sendgrid.prepare(&message(), &TracingListener).unwrap();
    assert!(!request.form.contains("html"));
    assert!(!request.form.contains("fromname"));
    assert!(!request.form.contains("replyto"));

    let mut message = message();
    message
        .set_html("<p>T</p>")
        .set_from_name("Alice")
        .set_reply_to("r@x.com");
    let request = sendgrid.prepare(&message, &TracingListener).unwrap();
    assert_eq!(field(&request.form, "html"), "<p>T</p>");
    assert_eq!(field(&request.form, "fromname"), "Alice");
    assert_eq!(field(&request.form, "replyto"), "r@x.com");
}

#[test]
fn test_sidecar_is_ascii() {
    let mut message = message();
    message
        .set_subject("Grüße")
        .add_section("-greeting-", "héllo 😀")
        .add_unique_argument("city", "Zürich");

    let sendgrid = engine(&RecordingTransport::responding(200, ""));
    let request = sendgrid.prepare(&message, &TracingListener).unwrap();
    let sidecar = field(&request.form, SMTPAPI_FIELD);

    assert!(sidecar.is_ascii());
    assert!(sidecar.contains("h\\u00e9llo \\ud83d\\ude00"));

    let decoded: serde_json::Value = serde_json::from_str(sidecar).unwrap();
    assert_eq!(decoded["section"]["-greeting-"], "héllo 😀");
    assert_eq!(decoded["unique_args"]["city"], "Zürich");
}

#[test]
fn test_header_bag_round_trip() {
    let mut message = message();
    message
        .add_category("welcome")
        .add_substitution("-name-", ["Ann", "Bob"])
        .add_section("-footer-", "Thanks")
        .add_unique_argument("campaign", "spring")
        .add_filter_setting("footer", "enable", "1");

    let json = message.headers().to_json().unwrap();
    let restored = SmtpApiHeader::from_json_str(&json).unwrap();
    assert_eq!(&restored, message.headers());

    let mut copy = Message::new("user", "key");
    copy.set_headers(restored);
    assert_eq!(copy.headers().categories().unwrap(), ["gridpost", "welcome"]);
    assert_eq!(copy.headers().filter_setting("footer", "enable"), Some("1"));
}

#[test]
fn test_bcc_goes_to_query_and_filter() {
    let mut message = message();
    message.set_bcc("hidden@x.com");

    let sendgrid = engine(&RecordingTransport::responding(200, ""));
    let request = sendgrid.prepare(&message, &TracingListener).unwrap();

    assert_eq!(request.url.query(), Some("bcc[]=hidden%40x.com"));
    assert!(!request.body().contains("bcc"));
    assert_eq!(
        message.headers().filter_setting("bcc", "email"),
        Some("hidden@x.com")
    );
}

// =============================================================================
// Send Outcome Tests
// =============================================================================

#[tokio::test]
async fn test_send_success() {
    let transport = RecordingTransport::responding(200, r#"{"message":"success"}"#);
    let sendgrid = engine(&transport);

    sendgrid.send(&message()).await.unwrap();

    assert_eq!(sendgrid.server_response(), SUCCESS);
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].0.as_str(),
        "https://sendgrid.com/api/mail.send.json"
    );
    assert!(requests[0].1.contains("api_user=user"));
}

#[tokio::test]
async fn test_send_rejected() {
    let transport = RecordingTransport::responding(
        400,
        r#"{"message":"error","errors":["invalid from","missing subject"]}"#,
    );
    let sendgrid = engine(&transport);

    let err = sendgrid.send(&message()).await.unwrap_err();

    assert!(err.is_rejected());
    assert_eq!(sendgrid.server_response(), "invalid from, missing subject");
}

#[tokio::test]
async fn test_send_transport_failure() {
    let transport = RecordingTransport::failing(|| MailError::io("connection reset"));
    let sendgrid = engine(&transport);

    let err = sendgrid.send(&message()).await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(sendgrid.server_response(), "IO - connection reset");
}

#[tokio::test]
async fn test_send_leaves_message_untouched() {
    let transport = RecordingTransport::responding(200, "");
    let sendgrid = engine(&transport);
    let message = message();
    let before = message.clone();

    sendgrid.send(&message).await.unwrap();
    sendgrid.send(&message).await.unwrap();

    assert_eq!(message, before);
    let requests = transport.requests();
    assert_eq!(requests[0].1, requests[1].1);
}

#[tokio::test]
async fn test_listener_sees_each_failure() {
    let transport = RecordingTransport::responding(500, "");
    let sendgrid = engine(&transport);
    let seen = Mutex::new(Vec::new());
    let listener = |response: &str, _error: Option<&MailError>| {
        seen.lock().unwrap().push(response.to_string());
    };

    let _ = sendgrid.send_with_listener(&message(), &listener).await;

    assert_eq!(*seen.lock().unwrap(), vec!["HTTP 500".to_string()]);
}
