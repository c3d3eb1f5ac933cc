//! The SMTP-API header bag carried in the `x-smtpapi` form field.
//!
//! Each recognized key has its own typed slot, so a category can never be
//! stored as a bare string and a filter setting always lives at
//! `filters.<name>.settings.<param>`. Raw JSON enters only through
//! [`SmtpApiHeader::from_json`], which is where a wrong shape is reported.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{MailError, Result};

/// Settings of a single provider-side filter (app).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSettings {
    /// Parameter name to value.
    #[serde(default, deserialize_with = "scalar_map")]
    pub settings: BTreeMap<String, String>,
}

/// Header bag serialized into the sidecar JSON field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmtpApiHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unique_args: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filters: Option<BTreeMap<String, FilterSettings>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to: Option<Vec<String>>,
}

impl SmtpApiHeader {
    /// Create an empty header bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a header bag from raw JSON.
    ///
    /// Fails with [`MailError::InvalidHeader`] when the value is not an
    /// object, carries an unknown key, or a known key has the wrong shape.
    pub fn from_json(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| MailError::InvalidHeader(e.to_string()))
    }

    /// Parse a header bag from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MailError::InvalidHeader(e.to_string()))
    }

    /// Render the bag as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Render the bag as compact JSON with every non-ASCII character escaped.
    pub fn to_ascii_json(&self) -> Result<String> {
        self.to_json().map(|json| escape_non_ascii(&json))
    }

    /// Whether nothing has been set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Category list.
    pub fn categories(&self) -> Option<&[String]> {
        self.category.as_deref()
    }

    /// Replace the category list with a single category.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = Some(vec![category.into()]);
    }

    /// Replace the category list.
    pub fn set_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category = Some(categories.into_iter().map(Into::into).collect());
    }

    /// Append a category, creating the list on first use.
    pub fn add_category(&mut self, category: impl Into<String>) {
        self.category.get_or_insert_with(Vec::new).push(category.into());
    }

    /// Substitution map.
    pub fn substitutions(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        self.sub.as_ref()
    }

    /// Replace the substitution map.
    pub fn set_substitutions(&mut self, substitutions: BTreeMap<String, Vec<String>>) {
        self.sub = Some(substitutions);
    }

    /// Insert or overwrite one substitution.
    pub fn add_substitution<I, S>(&mut self, from_value: impl Into<String>, to_values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub
            .get_or_insert_with(BTreeMap::new)
            .insert(from_value.into(), to_values.into_iter().map(Into::into).collect());
    }

    /// Section map.
    pub fn sections(&self) -> Option<&BTreeMap<String, String>> {
        self.section.as_ref()
    }

    /// Replace the section map.
    pub fn set_sections(&mut self, sections: BTreeMap<String, String>) {
        self.section = Some(sections);
    }

    /// Insert or overwrite one section.
    pub fn add_section(&mut self, from_value: impl Into<String>, to_value: impl Into<String>) {
        self.section
            .get_or_insert_with(BTreeMap::new)
            .insert(from_value.into(), to_value.into());
    }

    /// Unique arguments.
    pub fn unique_args(&self) -> Option<&BTreeMap<String, String>> {
        self.unique_args.as_ref()
    }

    /// Replace the unique arguments.
    pub fn set_unique_args(&mut self, args: BTreeMap<String, String>) {
        self.unique_args = Some(args);
    }

    /// Insert or overwrite one unique argument.
    pub fn add_unique_arg(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.unique_args
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }

    /// Filter settings.
    pub fn filters(&self) -> Option<&BTreeMap<String, FilterSettings>> {
        self.filters.as_ref()
    }

    /// A single filter setting.
    pub fn filter_setting(&self, filter_name: &str, param_name: &str) -> Option<&str> {
        self.filters
            .as_ref()?
            .get(filter_name)?
            .settings
            .get(param_name)
            .map(String::as_str)
    }

    /// Replace all filter settings.
    pub fn set_filters(&mut self, filters: BTreeMap<String, FilterSettings>) {
        self.filters = Some(filters);
    }

    /// Set `filters.<filter_name>.settings.<param_name>`, creating each
    /// missing level.
    pub fn add_filter_setting(
        &mut self,
        filter_name: impl Into<String>,
        param_name: impl Into<String>,
        param_value: impl Into<String>,
    ) {
        self.filters
            .get_or_insert_with(BTreeMap::new)
            .entry(filter_name.into())
            .or_default()
            .settings
            .insert(param_name.into(), param_value.into());
    }

    /// Recipients injected at send time.
    pub fn recipients(&self) -> Option<&[String]> {
        self.to.as_deref()
    }

    pub(crate) fn set_recipients(&mut self, recipients: Vec<String>) {
        self.to = Some(recipients);
    }
}

/// Escape every character above U+007F as `\uXXXX` (lowercase hex).
///
/// Characters outside the Basic Multilingual Plane are written as a UTF-16
/// surrogate pair so the result stays valid JSON.
pub fn escape_non_ascii(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut units = [0u16; 2];
    for c in input.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut units) {
                // Writing to a String cannot fail.
                let _ = write!(out, "\\u{:04x}", unit);
            }
        }
    }
    out
}

/// Filter parameters arrive as strings from this crate, but hand-written
/// JSON commonly uses numbers or booleans (`"enable": 1`).
fn scalar_map<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => Ok((key, s)),
            Value::Number(n) => Ok((key, n.to_string())),
            Value::Bool(b) => Ok((key, b.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "filter setting `{}` must be a scalar, got {}",
                key, other
            ))),
        })
        .collect()
}
