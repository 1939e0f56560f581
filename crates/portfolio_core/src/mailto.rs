//! Static-mode contact delivery.
//!
//! When the site is exported without a server, the contact form is sent by
//! the visitor's own mail client. This module composes that `mailto:` link
//! from a validated form so both delivery modes share one gate.

use crate::model::contact::ContactForm;

// Characters `encodeURIComponent` leaves untouched besides ASCII alphanumerics.
const UNRESERVED_MARKS: &[u8] = b"-_.!~*'()";

/// Builds the `mailto:` link for `form` addressed to `recipient`.
///
/// The subject falls back to `Portfolio Contact: <name>` when the form has
/// none. Subject and body are percent-encoded; `recipient` is used as-is.
pub fn compose_mailto(recipient: &str, form: &ContactForm) -> String {
    let subject = match form.subject() {
        Some(subject) => subject.to_string(),
        None => format!("Portfolio Contact: {}", form.name()),
    };
    let body = format!(
        "Name: {}\nEmail: {}\n\n{}",
        form.name(),
        form.email(),
        form.message()
    );

    format!(
        "mailto:{recipient}?subject={}&body={}",
        encode_uri_component(&subject),
        encode_uri_component(&body)
    )
}

/// Percent-encodes `value` the way browsers' `encodeURIComponent` does.
pub fn encode_uri_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || UNRESERVED_MARKS.contains(&byte) {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}
