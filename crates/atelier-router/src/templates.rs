// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound message copy: acknowledgment and reject decks, plus the
//! shared minimal HTML wrapper.

/// Subject of the customer acknowledgment.
pub const ACK_SUBJECT: &str = "Heerawalla - Your request has been received";

/// Subject of the reject auto-reply.
pub const REJECT_SUBJECT: &str = "Heerawalla - Please submit your request via our website";

/// Separator under which a stored Request Summary is appended to a
/// staff forward.
pub const FORWARD_SUMMARY_SEPARATOR: &str = "--- Original request ---";

pub const BESPOKE_URL: &str = "https://www.heerawalla.com/inspirations";
pub const BESPOKE_DIRECT_URL: &str = "https://www.heerawalla.com/bespoke";
pub const CONTACT_URL: &str = "https://www.heerawalla.com/contact";

const ACK_PARAGRAPHS: [&str; 5] = [
    "Thank you for contacting Heerawalla. We confirm receipt of your request. \
     Our atelier will reply personally within 1-2 business days.",
    "Next, our atelier will review your request and confirm details by reply. \
     Once aligned, we will share a final estimate and timeline.",
    "Your request now enters a deliberate, best-in-class craftsmanship process - \
     measured, personal, and worth the wait.",
    "If you would like to add details, submit a new note at Heerawalla.com/contact \
     and include your request ID.",
    "Privacy: We do not store your data beyond this email thread. This exchange \
     remains private and direct.",
];

const REJECT_PARAGRAPHS: [&str; 4] = [
    "Thank you for your message. To protect your privacy and ensure a consistent \
     atelier process, we can only accept new requests submitted through our website.",
    "Please visit https://www.heerawalla.com/inspirations, select an inspiration, \
     and click \"Request a bespoke quote.\"",
    "If you did not find a close match, submit a bespoke request here: \
     https://www.heerawalla.com/bespoke",
    "If you are replying to an existing Heerawalla thread, please reply directly \
     to that email instead.",
];

/// Plain-text acknowledgment body. The request-ID label sits first so a
/// customer reply round-trips the correlation token even when their
/// client drops the subject tag.
pub fn ack_text(id_label: &str) -> String {
    let mut out = String::new();
    out.push_str(id_label);
    out.push_str("\n\n");
    for paragraph in ACK_PARAGRAPHS {
        out.push_str(paragraph);
        out.push_str("\n\n");
    }
    out.push_str(signature());
    out
}

/// Plain-text reject body.
pub fn reject_text() -> String {
    let mut out = String::new();
    for paragraph in REJECT_PARAGRAPHS {
        out.push_str(paragraph);
        out.push_str("\n\n");
    }
    out.push_str(signature());
    out
}

/// HTML acknowledgment body.
pub fn ack_html(id_label: &str) -> String {
    let mut paragraphs: Vec<&str> = vec![id_label];
    paragraphs.extend(ACK_PARAGRAPHS);
    wrap_html("We have received your request", &paragraphs)
}

/// HTML reject body.
pub fn reject_html() -> String {
    wrap_html("Please submit your request via our website", &REJECT_PARAGRAPHS)
}

fn signature() -> &'static str {
    "Warm regards,\nHeerawalla\nwww.heerawalla.com\n"
}

/// Wraps a title and paragraphs into the atelier's minimal branded HTML
/// shell.
fn wrap_html(title: &str, paragraphs: &[&str]) -> String {
    let mut body = String::new();
    for paragraph in paragraphs {
        body.push_str(&format!(
            "<p style=\"margin:0 0 16px 0;font-size:15px;line-height:1.7;color:#334155;\">{}</p>\n",
            html_escape(paragraph)
        ));
    }
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"></head>\n\
         <body style=\"margin:0;padding:24px;background:#f6f5f2;color:#0f172a;\
         font-family:-apple-system, Segoe UI, Helvetica, Arial, sans-serif;\">\n\
         <div style=\"max-width:600px;margin:0 auto;background:#ffffff;\
         border:1px solid #e5e7eb;padding:36px 40px;\">\n\
         <div style=\"font-size:12px;letter-spacing:0.32em;text-transform:uppercase;\
         color:#64748b;margin-bottom:12px;\">Heerawalla</div>\n\
         <h1 style=\"margin:0 0 16px 0;font-size:22px;font-weight:600;\">{}</h1>\n\
         {}\
         <p style=\"margin:0;font-size:14px;\">Warm regards,<br>Heerawalla<br>\
         <a href=\"https://www.heerawalla.com\" style=\"color:#64748b;\">www.heerawalla.com</a></p>\n\
         </div>\n</body>\n</html>",
        html_escape(title),
        body
    )
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ack_text_leads_with_request_id_label() {
        let text = ack_text("Heerawalla Request ID: QR7T2K");
        assert!(text.starts_with("Heerawalla Request ID: QR7T2K\n"));
        assert!(text.contains("1-2 business days"));
        assert!(text.ends_with("www.heerawalla.com\n"));
    }

    #[test]
    fn reject_text_points_at_the_website() {
        let text = reject_text();
        assert!(text.contains(BESPOKE_URL));
        assert!(text.contains(BESPOKE_DIRECT_URL));
        assert!(text.contains("reply directly"));
    }

    #[test]
    fn html_bodies_escape_and_wrap() {
        let html = ack_html("Heerawalla Request ID: QR7T2K");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("We have received your request"));

        let reject = reject_html();
        assert!(reject.contains("&quot;") || reject.contains("Request a bespoke quote"));
        // Raw angle brackets from copy must not survive unescaped.
        assert!(!reject.contains("<Request"));
    }
}
