// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure text core of the atelier router: raw email decoding, reply-body
//! extraction, and correlation-ID handling.
//!
//! Everything in this crate is synchronous and side-effect free. The
//! decoding pipeline never errors: malformed transfer encodings and
//! broken multipart structures degrade to best-effort plain text.

pub mod address;
pub mod correlation;
pub mod encoding;
pub mod headers;
pub mod mime;
pub mod reply;
pub mod subject;

pub use address::{looks_no_reply, parse_from_header};
pub use correlation::{extract_correlation_id, find_correlation_id};
pub use reply::{extract_reply, ExtractedReply, EMPTY_REPLY_PLACEHOLDER};
pub use subject::{is_forward_subject, strip_reply_prefixes, with_correlation_tag};

/// A raw message split into its header block and fully decoded
/// plain-text body.
#[derive(Debug, Clone)]
pub struct DecodedEmail {
    pub headers: String,
    pub body: String,
}

impl DecodedEmail {
    /// Looks up a header value (case-insensitive, unfolded; "" if absent).
    pub fn header(&self, name: &str) -> String {
        headers::header_value(&self.headers, name)
    }

    /// True when any header's field name starts with `prefix`.
    pub fn has_header_with_prefix(&self, prefix: &str) -> bool {
        headers::has_header_with_prefix(&self.headers, prefix)
    }
}

/// Decodes one raw transfer unit: splits headers from body and decodes
/// the body per its MIME structure and transfer encoding.
pub fn decode_message(raw: &str) -> DecodedEmail {
    let (headers, body) = headers::split_raw(raw);
    let body = mime::decode_body(&headers, &body);
    DecodedEmail { headers, body }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_message_end_to_end_multipart() {
        let raw = "From: jane@example.com\r\n\
                   Subject: Re: ring [HW-REQ:AB12CD]\r\n\
                   Content-Type: multipart/alternative; boundary=b1\r\n\
                   \r\n\
                   --b1\r\n\
                   Content-Type: text/plain\r\n\
                   Content-Transfer-Encoding: quoted-printable\r\n\
                   \r\n\
                   Caf=C3=A9 visit works.\r\n\
                   --b1\r\n\
                   Content-Type: text/html\r\n\
                   \r\n\
                   <p>Caf&eacute; visit works.</p>\r\n\
                   --b1--\r\n";
        let decoded = decode_message(raw);
        assert_eq!(decoded.header("subject"), "Re: ring [HW-REQ:AB12CD]");
        assert_eq!(decoded.body.trim(), "Café visit works.");
        assert!(find_correlation_id(&decoded.header("Subject"), &decoded.body).is_some());
    }

    #[test]
    fn decode_message_headerless_blob() {
        let decoded = decode_message("bare text without headers");
        assert_eq!(decoded.headers, "");
        assert_eq!(decoded.body, "bare text without headers");
        assert_eq!(decoded.header("From"), "");
    }
}
