// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key namespace for the atelier's shared key-value store.
//!
//! Every key is a purpose prefix plus a normalized identifier: correlation
//! IDs uppercase, email addresses lowercase. All key construction lives
//! here so the namespace stays collision-free.

use atelier_core::{CorrelationId, EmailAddress};
use chrono::{DateTime, Utc};

/// Origin Record key: who owns the thread behind a correlation ID.
pub fn origin_key(id: &CorrelationId) -> String {
    format!("origin:{}", id.as_str())
}

/// Request Summary key: snapshot of the original inquiry text.
pub fn summary_key(id: &CorrelationId) -> String {
    format!("summary:{}", id.as_str())
}

/// Acknowledgment marker key: first auto-reply / staff-forward issued.
pub fn ack_key(id: &CorrelationId) -> String {
    format!("ack:{}", id.as_str())
}

/// Acknowledgment marker for a deferred batch queue kind.
pub fn ack_queue_key(kind: &str, id: &CorrelationId) -> String {
    format!("ack:{}:{}", kind, id.as_str())
}

/// Subscription marker key.
pub fn subscribed_key(email: &EmailAddress) -> String {
    format!("sub:{}", email.as_str())
}

/// Unsubscription marker key.
pub fn unsubscribed_key(email: &EmailAddress) -> String {
    format!("unsub:{}", email.as_str())
}

/// Hourly rate bucket key, e.g. `rl:contact:203.0.113.9:2026020314`.
pub fn rate_key(scope: &str, ip: &str, at: DateTime<Utc>) -> String {
    format!("rl:{}:{}:{}", scope, ip, at.format("%Y%m%d%H"))
}
