// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Body decoding: multipart part selection, transfer decoding, and
//! HTML-to-text conversion.
//!
//! Only plain single-level `multipart/alternative` structures are in
//! scope; anything deeper is walked best-effort and degrades to plain
//! text rather than failing.

use tracing::debug;

use crate::encoding::{
    decode_base64_text, decode_quoted_printable, looks_quoted_printable, normalize_newlines,
};
use crate::headers::{header_value, split_raw};

/// Decodes the body of a message given its header block and raw body
/// text. Multipart bodies yield the best text part (plain preferred over
/// HTML); flat bodies are decoded per their transfer encoding.
pub fn decode_body(headers: &str, body: &str) -> String {
    let content_type = header_value(headers, "Content-Type");
    if content_type.to_ascii_lowercase().contains("multipart/") {
        if let Some(boundary) = boundary_param(&content_type) {
            return best_part_text(body, &boundary);
        }
        debug!("multipart content type without boundary parameter, decoding flat");
    }
    decode_transfer(headers, body)
}

/// Extracts the `boundary` parameter from a Content-Type value,
/// tolerating quoting and parameter ordering.
pub fn boundary_param(content_type: &str) -> Option<String> {
    let lower = content_type.to_ascii_lowercase();
    let idx = lower.find("boundary=")?;
    let rest = &content_type[idx + "boundary=".len()..];
    let value = if let Some(stripped) = rest.strip_prefix('"') {
        stripped.split('"').next().unwrap_or("")
    } else {
        rest.split([';', ' ', '\t']).next().unwrap_or("")
    };
    let value = value.trim();
    if value.is_empty() { None } else { Some(value.to_string()) }
}

/// Splits a multipart body on its boundary markers and returns the first
/// text/plain part, else the first text/html part converted to plain
/// text, else empty. Nested multipart parts are recursed into.
fn best_part_text(body: &str, boundary: &str) -> String {
    let normalized = normalize_newlines(body);
    let marker = format!("--{boundary}");

    let mut first_html: Option<String> = None;
    for segment in normalized.split(marker.as_str()).skip(1) {
        // The closing marker leaves a segment starting with `--`.
        if segment.starts_with("--") {
            break;
        }
        let part = segment.strip_prefix('\n').unwrap_or(segment);
        let (part_headers, part_body) = split_raw(part);
        let raw_part_type = header_value(&part_headers, "Content-Type");
        let part_type = raw_part_type.to_ascii_lowercase();

        if part_type.contains("multipart/") {
            // Boundary values are case-sensitive; extract from the
            // unlowered header.
            if let Some(inner) = boundary_param(&raw_part_type) {
                let text = best_part_text(&part_body, &inner);
                if !text.is_empty() {
                    return text;
                }
                continue;
            }
        }

        if part_type.contains("text/plain") || part_type.is_empty() {
            return decode_transfer(&part_headers, &part_body);
        }
        if part_type.contains("text/html") && first_html.is_none() {
            first_html = Some(decode_transfer(&part_headers, &part_body));
        }
    }

    first_html.map(|html| html_to_text(&html)).unwrap_or_default()
}

/// Decodes a flat body per its Content-Transfer-Encoding. Malformed
/// base64 falls back to the original text; undeclared encodings that look
/// quoted-printable are decoded as such.
fn decode_transfer(headers: &str, body: &str) -> String {
    let encoding = header_value(headers, "Content-Transfer-Encoding").to_ascii_lowercase();
    let normalized = normalize_newlines(body);

    if encoding.contains("base64") {
        return match decode_base64_text(&normalized) {
            Some(text) => normalize_newlines(&text),
            None => {
                debug!("malformed base64 body, returning undecoded text");
                normalized
            }
        };
    }
    if encoding.contains("quoted-printable") {
        return decode_quoted_printable(&normalized);
    }
    if encoding.is_empty() && looks_quoted_printable(&normalized) {
        return decode_quoted_printable(&normalized);
    }
    normalized
}

/// Converts an HTML part to plain text. Uses html2text for layout; if
/// the converter rejects the input, falls back to tag stripping with
/// entity unescaping.
pub fn html_to_text(html: &str) -> String {
    match html2text::from_read(html.as_bytes(), 78) {
        Ok(text) => normalize_newlines(&text),
        Err(_) => strip_tags(html),
    }
}

/// Minimal tag stripper: `<br>` becomes a newline, `</p>` a blank line,
/// every other tag vanishes, common entities are unescaped.
fn strip_tags(html: &str) -> String {
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len());
    let mut i = 0;
    let bytes = html.as_bytes();
    while i < bytes.len() {
        if bytes[i] == b'<' {
            let close = match html[i..].find('>') {
                Some(rel) => i + rel,
                None => break,
            };
            let tag = &lower[i..=close];
            if tag.starts_with("<br") {
                out.push('\n');
            } else if tag.starts_with("</p") {
                out.push_str("\n\n");
            }
            i = close + 1;
        } else {
            // Advance one full character, not one byte.
            let ch = html[i..].chars().next().unwrap_or('\u{FFFD}');
            out.push(ch);
            i += ch.len_utf8();
        }
    }
    for (entity, plain) in [
        ("&nbsp;", " "),
        ("&amp;", "&"),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
    ] {
        out = out.replace(entity, plain);
    }
    normalize_newlines(&out)
}
