//! Request serialization: form fields, body encoding and the bcc query.

use std::collections::BTreeMap;

use tracing::trace;
use url::form_urlencoded;

use crate::{MailError, Message, WarningListener};

/// Name of the form field carrying the JSON header bag.
pub const SMTPAPI_FIELD: &str = "x-smtpapi";

/// Value of a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// Sent as `key=value`.
    Text(String),
    /// Sent as one `key[]=value` pair per element.
    List(Vec<String>),
}

impl FormValue {
    /// The scalar value, if this is a text field.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::List(_) => None,
        }
    }

    /// The elements, if this is a list field.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(values) => Some(values),
            Self::Text(_) => None,
        }
    }
}

/// Form fields of a send request, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: BTreeMap<&'static str, FormValue>,
}

impl FormData {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a text field.
    pub fn insert_text(&mut self, name: &'static str, value: impl Into<String>) {
        self.fields.insert(name, FormValue::Text(value.into()));
    }

    /// Set a list field.
    pub fn insert_list(&mut self, name: &'static str, values: Vec<String>) {
        self.fields.insert(name, FormValue::List(values));
    }

    /// Look up a field.
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.fields.get(name)
    }

    /// Look up a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FormValue::as_text)
    }

    /// Look up a list field.
    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(FormValue::as_list)
    }

    /// Whether a field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in encoding order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encode as an `application/x-www-form-urlencoded` body.
    pub fn encode(&self) -> String {
        let mut pairs = Vec::new();
        for (name, value) in &self.fields {
            match value {
                FormValue::Text(value) => {
                    pairs.push(format!("{}={}", encode_component(name), encode_component(value)));
                }
                FormValue::List(values) => pairs.extend(array_pairs(name, values)),
            }
        }
        pairs.join("&")
    }
}

/// Percent-encode one form component (UTF-8, `+` for space).
pub fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Render `token[]=value` pairs, one per element.
pub fn array_pairs<'a>(token: &'a str, values: &'a [String]) -> impl Iterator<Item = String> + 'a {
    values
        .iter()
        .map(move |value| format!("{}[]={}", token, encode_component(value)))
}

/// Query string carrying the blind-copy list, `None` when there is none.
pub fn bcc_query(bccs: &[String]) -> Option<String> {
    if bccs.is_empty() {
        None
    } else {
        Some(array_pairs("bcc", bccs).collect::<Vec<_>>().join("&"))
    }
}

/// Collect the form fields for `message`.
///
/// The message is not modified: in sidecar mode the recipients are added to
/// a copy of the header bag. A sidecar that cannot be rendered is reported
/// to `listener` and left out, and the rest of the request is still built.
pub fn prepare_message_data(message: &Message, listener: &dyn WarningListener) -> FormData {
    let mut form = FormData::new();

    form.insert_text("api_user", message.api_user());
    form.insert_text("api_key", message.api_key());
    form.insert_text("subject", message.subject().unwrap_or_default());
    form.insert_text("text", message.text().unwrap_or_default());
    form.insert_text("from", message.from().unwrap_or_default());

    if let Some(html) = message.html() {
        form.insert_text("html", html);
    }
    if let Some(from_name) = message.from_name() {
        form.insert_text("fromname", from_name);
    }
    if let Some(reply_to) = message.reply_to() {
        form.insert_text("replyto", reply_to);
    }

    if message.use_headers() {
        form.insert_text("to", message.from().unwrap_or_default());

        let mut headers = message.headers().clone();
        headers.set_recipients(message.tos());
        // The typed bag has string keys only, so this does not fail today.
        match headers.to_ascii_json() {
            Ok(json) => form.insert_text(SMTPAPI_FIELD, json),
            Err(e) => {
                let error = MailError::Encoding(e.to_string());
                listener.warning("Unsupported Encoding", Some(&error));
            }
        }
    } else {
        form.insert_list("to", message.tos());
        if message.has_named_recipients() {
            form.insert_list("toname", message.to_names());
        }
    }

    trace!(fields = ?form.names().collect::<Vec<_>>(), "Prepared message data");
    form
}
