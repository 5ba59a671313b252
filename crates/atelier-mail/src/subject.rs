// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subject-line normalization and correlation tagging.

use atelier_core::CorrelationId;

const REPLY_PREFIXES: [&str; 4] = ["re:", "fwd:", "fw:", "aw:"];
const FORWARD_PREFIXES: [&str; 2] = ["fwd:", "fw:"];

/// Strips any number of leading `Re:`/`Fwd:`/`Fw:`/`Aw:` tokens,
/// case-insensitively, repeatedly (handles `Re: Re: Fwd:`).
pub fn strip_reply_prefixes(subject: &str) -> &str {
    let mut rest = subject.trim_start();
    loop {
        let lower = rest.to_ascii_lowercase();
        let Some(prefix) = REPLY_PREFIXES.iter().find(|p| lower.starts_with(*p)) else {
            return rest;
        };
        rest = rest[prefix.len()..].trim_start();
    }
}

/// True when the subject starts with a forward marker (`Fwd:`/`Fw:`).
pub fn is_forward_subject(subject: &str) -> bool {
    let lower = subject.trim_start().to_ascii_lowercase();
    FORWARD_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// Rebuilds a subject so it carries the correlation tag, appending
/// `[HW-REQ:ID]` only when the tag is not already present anywhere.
pub fn with_correlation_tag(subject: &str, id: &CorrelationId) -> String {
    let needle = format!("HW-REQ:{}", id.as_str());
    if subject.to_ascii_uppercase().contains(&needle) {
        return subject.to_string();
    }
    let trimmed = subject.trim();
    if trimmed.is_empty() {
        id.subject_tag()
    } else {
        format!("{} {}", trimmed, id.subject_tag())
    }
}
