// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signal computation for one inbound message.
//!
//! Pure: turns a decoded message plus routing configuration into either
//! an early terminal decision (unroutable, skip) or a [`ClassifiedEmail`]
//! carrying every signal the async routing steps need.

use atelier_core::ClassifiedEmail;
use atelier_mail::{
    DecodedEmail, find_correlation_id, is_forward_subject, looks_no_reply, parse_from_header,
};

use crate::config::RouterConfig;

/// Why a message is skipped without any further action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Addressed to the dedicated no-reply sink.
    NoReplySink,
    /// Auto-generated or bulk mail (or a no-reply sender).
    AutoOrBulk,
}

/// Why a message cannot be processed at all. Aborts are silent: no email
/// is sent, no state is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnroutableReason {
    /// The From header is empty.
    EmptyFrom,
    /// The sender address fails basic validation.
    InvalidSenderAddress,
}

/// Result of the pure classification pass.
#[derive(Debug, Clone)]
pub enum Classification {
    Unroutable(UnroutableReason),
    Skip(SkipReason),
    Classified(ClassifiedEmail),
}

/// Computes the classification signals for one decoded message.
pub fn classify(
    decoded: &DecodedEmail,
    envelope_to: &str,
    config: &RouterConfig,
) -> Classification {
    let from_header = decoded.header("From");
    if from_header.trim().is_empty() {
        return Classification::Unroutable(UnroutableReason::EmptyFrom);
    }

    if resolved_to(decoded, envelope_to) == config.no_reply_address.to_ascii_lowercase() {
        return Classification::Skip(SkipReason::NoReplySink);
    }

    let Some((sender_name, sender)) = parse_from_header(&from_header) else {
        return Classification::Unroutable(UnroutableReason::InvalidSenderAddress);
    };

    let is_auto_generated = detect_auto_generated(decoded);
    if is_auto_generated || looks_no_reply(&from_header) {
        return Classification::Skip(SkipReason::AutoOrBulk);
    }

    let subject = decoded.header("Subject");
    let is_forwarded =
        decoded.has_header_with_prefix("Resent-") || is_forward_subject(&subject);

    let correlation_id = find_correlation_id(&subject, &decoded.body);
    let is_internal_sender = config.internal_set().contains(sender.as_str());

    Classification::Classified(ClassifiedEmail {
        sender,
        sender_name,
        subject,
        body: decoded.body.clone(),
        correlation_id,
        is_auto_generated,
        is_forwarded,
        is_internal_sender,
    })
}

/// The envelope recipient, falling back to the To header's address part
/// when the transport did not supply one. Lowercased for comparison.
fn resolved_to(decoded: &DecodedEmail, envelope_to: &str) -> String {
    let envelope = envelope_to.trim();
    if !envelope.is_empty() {
        return envelope.to_ascii_lowercase();
    }
    let to_header = decoded.header("To");
    match parse_from_header(&to_header) {
        Some((_, addr)) => addr.as_str().to_string(),
        None => to_header.trim().to_ascii_lowercase(),
    }
}

/// Auto-generated / bulk detection: `Auto-Submitted` carrying an `auto-`
/// value, a bulk/list/junk `Precedence`, or any `List-Id` header.
fn detect_auto_generated(decoded: &DecodedEmail) -> bool {
    if decoded.header("Auto-Submitted").to_ascii_lowercase().contains("auto-") {
        return true;
    }
    let precedence = decoded.header("Precedence").to_ascii_lowercase();
    if ["bulk", "list", "junk"].iter().any(|p| precedence.contains(p)) {
        return true;
    }
    decoded.has_header_with_prefix("List-Id")
}
