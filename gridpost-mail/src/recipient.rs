//! Recipient types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A "to" recipient with an optional display name.
///
/// Addresses are opaque: the provider validates them, this crate only
/// carries them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipient {
    /// The email address.
    pub email: String,
    /// Optional display name, never empty when present.
    pub name: Option<String>,
}

impl Recipient {
    /// Create a recipient with just an email.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    /// Create a recipient with a display name. An empty name is dropped.
    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            email: email.into(),
            name: (!name.is_empty()).then_some(name),
        }
    }

    /// Get the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Get the display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The name as sent in the parallel `toname` list; blank names become `""`.
    pub fn name_or_placeholder(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "",
        }
    }
}

/// Renders the wire form `name<email>`, or the bare email when unnamed.
impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}<{}>", name, self.email),
            None => f.write_str(&self.email),
        }
    }
}

impl From<&str> for Recipient {
    fn from(email: &str) -> Self {
        Self::new(email)
    }
}

impl From<String> for Recipient {
    fn from(email: String) -> Self {
        Self::new(email)
    }
}
