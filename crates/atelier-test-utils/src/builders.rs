// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw-message builders for router and decoder tests.

use atelier_core::InboundEmail;

/// Builds a minimal raw transfer unit with CRLF header terminators.
pub fn raw_email(from: &str, to: &str, subject: &str, body: &str) -> String {
    raw_email_with_headers(from, to, subject, body, &[])
}

/// Like [`raw_email`] with additional headers.
pub fn raw_email_with_headers(
    from: &str,
    to: &str,
    subject: &str,
    body: &str,
    extra: &[(&str, &str)],
) -> String {
    let mut raw = String::new();
    raw.push_str(&format!("From: {from}\r\n"));
    raw.push_str(&format!("To: {to}\r\n"));
    raw.push_str(&format!("Subject: {subject}\r\n"));
    for (name, value) in extra {
        raw.push_str(&format!("{name}: {value}\r\n"));
    }
    raw.push_str("\r\n");
    raw.push_str(body);
    raw
}

/// Wraps a raw message into an [`InboundEmail`] with the given envelope
/// recipient.
pub fn inbound(raw: String, envelope_to: &str) -> InboundEmail {
    InboundEmail {
        raw,
        envelope_to: envelope_to.to_string(),
    }
}
