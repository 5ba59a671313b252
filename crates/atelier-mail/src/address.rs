// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! From-header parsing and no-reply sender detection.

use atelier_core::EmailAddress;

/// Markers whose presence anywhere in a From header flags a machine
/// sender that must never receive a reply.
const NO_REPLY_MARKERS: [&str; 5] = ["no-reply", "noreply", "mailer-daemon", "postmaster", "bounce."];

/// Parses `"Name" <addr>`, `Name <addr>`, `<addr>`, or a bare address
/// into (display name, address). Returns `None` when the address part
/// fails basic validation.
pub fn parse_from_header(from: &str) -> Option<(String, EmailAddress)> {
    let from = from.trim();
    if from.is_empty() {
        return None;
    }

    if let Some(open) = from.rfind('<') {
        let close = from[open..].find('>')? + open;
        let addr = EmailAddress::parse(&from[open + 1..close])?;
        let name = from[..open]
            .trim()
            .trim_matches('"')
            .trim()
            .to_string();
        return Some((name, addr));
    }

    let addr = EmailAddress::parse(from)?;
    Some((String::new(), addr))
}

/// True when the From header text carries any no-reply/bounce marker.
pub fn looks_no_reply(from: &str) -> bool {
    let lower = from.to_ascii_lowercase();
    NO_REPLY_MARKERS.iter().any(|m| lower.contains(m))
}
