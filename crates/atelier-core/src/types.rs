// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types shared across the atelier workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Alphabet used when minting correlation IDs. Excludes `I`, `O`, `0`, `1`
/// to keep the token unambiguous when read back over phone or handwriting.
pub const CORRELATION_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of a minted correlation ID.
pub const CORRELATION_LENGTH: usize = 6;

/// Machine-readable subject tag prefix, embedded as `[HW-REQ:TOKEN]`.
pub const CORRELATION_PREFIX: &str = "HW-REQ:";

/// Human-readable body label, embedded as `Heerawalla Request ID: TOKEN`.
pub const CORRELATION_LABEL: &str = "Heerawalla Request ID:";

/// Opaque per-inquiry token that threads a customer conversation across
/// separate emails.
///
/// Stored and compared uppercase. Parsing accepts any alphanumeric token
/// (inbound mail clients re-case freely); only minting is restricted to
/// [`CORRELATION_ALPHABET`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Normalizes a raw token to the canonical uppercase form.
    ///
    /// Returns `None` for empty or non-alphanumeric input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(Self(trimmed.to_ascii_uppercase()))
    }

    /// Mints a fresh ID from [`CORRELATION_ALPHABET`].
    pub fn mint() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let token: String = (0..CORRELATION_LENGTH)
            .map(|_| CORRELATION_ALPHABET[rng.gen_range(0..CORRELATION_ALPHABET.len())] as char)
            .collect();
        Self(token)
    }

    /// The canonical uppercase token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bracketed subject tag form, e.g. `[HW-REQ:QR7T2K]`.
    pub fn subject_tag(&self) -> String {
        format!("[{}{}]", CORRELATION_PREFIX, self.0)
    }

    /// The human-readable body label form, e.g.
    /// `Heerawalla Request ID: QR7T2K`.
    pub fn body_label(&self) -> String {
        format!("{} {}", CORRELATION_LABEL, self.0)
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A normalized (lowercased, trimmed) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and normalizes an address, rejecting anything that fails
    /// basic shape validation.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if !is_valid_email(trimmed) {
            return None;
        }
        Some(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The domain part (after the `@`).
    pub fn domain(&self) -> &str {
        self.0.rsplit('@').next().unwrap_or("")
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Basic email-address shape validation: one `@`, non-empty local part,
/// dotted domain, no whitespace. Deliverability is the transport's problem.
pub fn is_valid_email(addr: &str) -> bool {
    if addr.is_empty() || addr.len() > 254 {
        return false;
    }
    if addr.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    let Some((local, domain)) = addr.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// One raw inbound email as delivered by the transport: the undifferentiated
/// transfer unit plus the envelope recipient.
#[derive(Debug, Clone)]
pub struct InboundEmail {
    /// Raw headers + body blob.
    pub raw: String,
    /// Envelope `RCPT TO` address (not the `To:` header).
    pub envelope_to: String,
}

/// A fully composed outbound message handed to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: Vec<String>,
    pub sender: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
    /// Extra RFC 5322 headers, e.g. `Auto-Submitted: auto-replied`.
    pub extra_headers: Vec<(String, String)>,
}

/// The per-message decision object produced by classification.
///
/// Ephemeral: exists only for the duration of processing one inbound message.
#[derive(Debug, Clone)]
pub struct ClassifiedEmail {
    pub sender: EmailAddress,
    pub sender_name: String,
    pub subject: String,
    /// Decoded plain-text body (before reply extraction).
    pub body: String,
    pub correlation_id: Option<CorrelationId>,
    pub is_auto_generated: bool,
    pub is_forwarded: bool,
    pub is_internal_sender: bool,
}

/// Which spreadsheet a ledger row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum LedgerKind {
    Orders,
    Quotes,
    Contacts,
}
