// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Correlation-ID extraction from free-form subject and body text.
//!
//! Two textual encodings round-trip through customer mail clients: the
//! machine tag `HW-REQ:TOKEN` (usually bracketed in a subject) and the
//! human-readable `Heerawalla Request ID: TOKEN` body label.

use std::sync::LazyLock;

use regex::Regex;

use atelier_core::CorrelationId;

static MACHINE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)HW-REQ:([A-Za-z0-9]+)").expect("static pattern"));

static HUMAN_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Heerawalla Request ID:\s+([A-Za-z0-9]+)").expect("static pattern")
});

/// Scans arbitrary text for an embedded correlation token. The machine
/// tag wins over the human-readable label; both are matched
/// case-insensitively and normalized to uppercase.
pub fn extract_correlation_id(text: &str) -> Option<CorrelationId> {
    if let Some(caps) = MACHINE_TAG.captures(text) {
        return CorrelationId::parse(&caps[1]);
    }
    if let Some(caps) = HUMAN_LABEL.captures(text) {
        return CorrelationId::parse(&caps[1]);
    }
    None
}

/// Applies [`extract_correlation_id`] to subject then body. Subject is
/// authoritative when both carry a token: this is the documented existing
/// precedence, not a defense against forged bodies.
pub fn find_correlation_id(subject: &str, body: &str) -> Option<CorrelationId> {
    extract_correlation_id(subject).or_else(|| extract_correlation_id(body))
}
