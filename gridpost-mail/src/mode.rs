//! Choice between the `x-smtpapi` sidecar and plain recipient fields.
//!
//! Two signals feed the decision and they are not symmetric: an empty bcc
//! list or an explicit `false` preference makes plain fields *preferable*,
//! but an explicit `true` preference makes the sidecar *required*, and a
//! requirement beats a preference.

/// Whether recipients and tracking data travel in the `x-smtpapi` field.
pub fn use_headers(preference: Option<bool>, bcc_count: usize) -> bool {
    !(prefer_plain_fields(preference, bcc_count) && !headers_required(preference))
}

fn prefer_plain_fields(preference: Option<bool>, bcc_count: usize) -> bool {
    bcc_count == 0 || preference == Some(false)
}

fn headers_required(preference: Option<bool>) -> bool {
    preference == Some(true)
}
