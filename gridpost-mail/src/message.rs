//! Message builder.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::header::{FilterSettings, SmtpApiHeader};
use crate::{Recipient, Result, mode};

/// Category every new message starts with.
pub const DEFAULT_CATEGORY: &str = "gridpost";

/// An outgoing message and the credentials it is sent with.
///
/// Setters take `&mut self` and return it, so calls chain and the same
/// message can be adjusted and sent again:
///
/// ```
/// use gridpost_mail::Message;
///
/// let mut message = Message::new("api-user", "api-key");
/// message
///     .set_from("news@example.com")
///     .add_to("ann@example.com", "Ann")
///     .set_subject("Hello")
///     .set_text("Hi there")
///     .add_category("newsletter");
///
/// assert_eq!(message.tos(), vec!["Ann<ann@example.com>"]);
/// ```
#[derive(Clone, PartialEq)]
pub struct Message {
    api_user: String,
    api_key: String,
    from: Option<String>,
    from_name: Option<String>,
    reply_to: Option<String>,
    subject: Option<String>,
    text: Option<String>,
    html: Option<String>,
    to: Vec<Recipient>,
    bcc: Vec<String>,
    headers: SmtpApiHeader,
    header_preference: Option<bool>,
}

impl Message {
    /// Create a message sent with the given API credentials.
    ///
    /// The credentials are not checked locally; the provider does that.
    pub fn new(api_user: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut headers = SmtpApiHeader::new();
        headers.set_category(DEFAULT_CATEGORY);

        Self {
            api_user: api_user.into(),
            api_key: api_key.into(),
            from: None,
            from_name: None,
            reply_to: None,
            subject: None,
            text: None,
            html: None,
            to: Vec::new(),
            bcc: Vec::new(),
            headers,
            header_preference: Some(true),
        }
    }

    /// API user the message is sent as.
    pub fn api_user(&self) -> &str {
        &self.api_user
    }

    /// API key the message is sent with.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    // ---------------------------------------------------------------------
    // Recipients
    // ---------------------------------------------------------------------

    /// Recipients in the order they were added.
    pub fn recipients(&self) -> &[Recipient] {
        &self.to
    }

    /// Recipients as sent on the wire: `name<email>` or the bare email.
    pub fn tos(&self) -> Vec<String> {
        self.to.iter().map(ToString::to_string).collect()
    }

    /// Recipient names, parallel to [`tos`](Self::tos), `""` for unnamed entries.
    pub fn to_names(&self) -> Vec<String> {
        self.to
            .iter()
            .map(|r| r.name_or_placeholder().to_string())
            .collect()
    }

    /// Whether any recipient carries a display name.
    pub fn has_named_recipients(&self) -> bool {
        self.to.iter().any(|r| !r.name_or_placeholder().is_empty())
    }

    /// Replace all recipients with a single address.
    pub fn set_to(&mut self, email: impl Into<String>) -> &mut Self {
        self.to = vec![Recipient::new(email)];
        self
    }

    /// Append a recipient. An empty `name` adds the bare address.
    pub fn add_to(&mut self, email: impl Into<String>, name: impl Into<String>) -> &mut Self {
        self.to.push(Recipient::with_name(email, name));
        self
    }

    /// Append a recipient without a display name.
    pub fn add_to_email(&mut self, email: impl Into<String>) -> &mut Self {
        self.to.push(Recipient::new(email));
        self
    }

    /// Blind-copy recipients.
    pub fn bccs(&self) -> &[String] {
        &self.bcc
    }

    /// Replace all blind-copy recipients with a single address.
    ///
    /// When the message uses the sidecar field, this also enables the
    /// provider's bcc filter for `email`. [`add_bcc`](Self::add_bcc) does not.
    pub fn set_bcc(&mut self, email: impl Into<String>) -> &mut Self {
        let email = email.into();
        self.bcc = vec![email.clone()];
        if self.use_headers() {
            self.headers.add_filter_setting("bcc", "enable", "1");
            self.headers.add_filter_setting("bcc", "email", email);
        }
        self
    }

    /// Append a blind-copy recipient.
    pub fn add_bcc(&mut self, email: impl Into<String>) -> &mut Self {
        self.bcc.push(email.into());
        self
    }

    // ---------------------------------------------------------------------
    // Content
    // ---------------------------------------------------------------------

    /// Sender address.
    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    /// Set the sender address.
    pub fn set_from(&mut self, email: impl Into<String>) -> &mut Self {
        self.from = Some(email.into());
        self
    }

    /// Sender display name.
    pub fn from_name(&self) -> Option<&str> {
        self.from_name.as_deref()
    }

    /// Set the sender display name.
    pub fn set_from_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.from_name = Some(name.into());
        self
    }

    /// Reply-to address.
    pub fn reply_to(&self) -> Option<&str> {
        self.reply_to.as_deref()
    }

    /// Set the reply-to address.
    pub fn set_reply_to(&mut self, email: impl Into<String>) -> &mut Self {
        self.reply_to = Some(email.into());
        self
    }

    /// Subject line.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Set the subject line.
    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.subject = Some(subject.into());
        self
    }

    /// Plain text body.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Set the plain text body.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    /// HTML body.
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// Set the HTML body.
    pub fn set_html(&mut self, html: impl Into<String>) -> &mut Self {
        self.html = Some(html.into());
        self
    }

    // ---------------------------------------------------------------------
    // Header bag
    // ---------------------------------------------------------------------

    /// The header bag.
    pub fn headers(&self) -> &SmtpApiHeader {
        &self.headers
    }

    /// Replace the whole header bag.
    pub fn set_headers(&mut self, headers: SmtpApiHeader) -> &mut Self {
        self.headers = headers;
        self
    }

    /// Replace the whole header bag from raw JSON.
    ///
    /// On error the current bag is left as it was.
    pub fn set_headers_json(&mut self, value: Value) -> Result<&mut Self> {
        self.headers = SmtpApiHeader::from_json(value)?;
        Ok(self)
    }

    /// Replace the whole header bag from a JSON string.
    pub fn set_headers_str(&mut self, json: &str) -> Result<&mut Self> {
        self.headers = SmtpApiHeader::from_json_str(json)?;
        Ok(self)
    }

    /// Replace the category list with one category.
    pub fn set_category(&mut self, category: impl Into<String>) -> &mut Self {
        self.headers.set_category(category);
        self
    }

    /// Replace the category list.
    pub fn set_categories<I, S>(&mut self, categories: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers.set_categories(categories);
        self
    }

    /// Append a category.
    pub fn add_category(&mut self, category: impl Into<String>) -> &mut Self {
        self.headers.add_category(category);
        self
    }

    /// Replace all substitutions. Each value list lines up with the recipients.
    pub fn set_substitutions(&mut self, substitutions: BTreeMap<String, Vec<String>>) -> &mut Self {
        self.headers.set_substitutions(substitutions);
        self
    }

    /// Substitute `from_value` with one value per recipient.
    pub fn add_substitution<I, S>(&mut self, from_value: impl Into<String>, to_values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers.add_substitution(from_value, to_values);
        self
    }

    /// Replace all sections.
    pub fn set_sections(&mut self, sections: BTreeMap<String, String>) -> &mut Self {
        self.headers.set_sections(sections);
        self
    }

    /// Add or overwrite a section.
    pub fn add_section(&mut self, from_value: impl Into<String>, to_value: impl Into<String>) -> &mut Self {
        self.headers.add_section(from_value, to_value);
        self
    }

    /// Replace all unique (tracking) arguments.
    pub fn set_unique_arguments(&mut self, args: BTreeMap<String, String>) -> &mut Self {
        self.headers.set_unique_args(args);
        self
    }

    /// Add or overwrite a unique (tracking) argument.
    pub fn add_unique_argument(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.add_unique_arg(key, value);
        self
    }

    /// Replace all filter settings.
    pub fn set_filter_settings(&mut self, filters: BTreeMap<String, FilterSettings>) -> &mut Self {
        self.headers.set_filters(filters);
        self
    }

    /// Set one parameter of a provider-side filter.
    pub fn add_filter_setting(
        &mut self,
        filter_name: impl Into<String>,
        param_name: impl Into<String>,
        param_value: impl Into<String>,
    ) -> &mut Self {
        self.headers.add_filter_setting(filter_name, param_name, param_value);
        self
    }

    // ---------------------------------------------------------------------
    // Encoding mode
    // ---------------------------------------------------------------------

    /// The explicit sidecar preference, `None` when unset.
    pub fn header_preference(&self) -> Option<bool> {
        self.header_preference
    }

    /// Require (`true`) or avoid (`false`) the `x-smtpapi` sidecar.
    pub fn set_use_headers(&mut self, use_headers: bool) -> &mut Self {
        self.header_preference = Some(use_headers);
        self
    }

    /// Drop the preference; the sidecar is then used only when there are bcc
    /// recipients.
    pub fn unset_use_headers(&mut self) -> &mut Self {
        self.header_preference = None;
        self
    }

    /// Whether the message is currently sent through the `x-smtpapi` sidecar.
    pub fn use_headers(&self) -> bool {
        mode::use_headers(self.header_preference, self.bcc.len())
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("api_user", &self.api_user)
            .field("api_key", &"<redacted>")
            .field("from", &self.from)
            .field("from_name", &self.from_name)
            .field("reply_to", &self.reply_to)
            .field("subject", &self.subject)
            .field("to", &self.to)
            .field("bcc", &self.bcc)
            .field("headers", &self.headers)
            .field("header_preference", &self.header_preference)
            .finish_non_exhaustive()
    }
}
