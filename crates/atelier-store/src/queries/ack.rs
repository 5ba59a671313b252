// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Acknowledgment gate: write-once-observed idempotency markers.
//!
//! The check-then-set pair is not transactional. Two near-simultaneous
//! emails for the same correlation ID can both observe "not yet sent"
//! and both send; a rare duplicate "thank you" is accepted over the
//! complexity of a distributed lock.

use atelier_core::{AtelierError, CorrelationId, KeyValueStore};

use crate::keys::{ack_key, ack_queue_key};
use crate::ACK_TTL;

/// True when an acknowledgment has already been issued for this thread.
pub async fn already_acknowledged(
    kv: &dyn KeyValueStore,
    id: &CorrelationId,
) -> Result<bool, AtelierError> {
    Ok(kv.get(&ack_key(id)).await?.is_some())
}

/// Marks the thread as acknowledged.
pub async fn mark_acknowledged(
    kv: &dyn KeyValueStore,
    id: &CorrelationId,
) -> Result<(), AtelierError> {
    kv.put(&ack_key(id), "1", Some(ACK_TTL)).await
}

/// Queue-kind variant for deferred batch acknowledgments.
pub async fn already_acknowledged_queued(
    kv: &dyn KeyValueStore,
    kind: &str,
    id: &CorrelationId,
) -> Result<bool, AtelierError> {
    Ok(kv.get(&ack_queue_key(kind, id)).await?.is_some())
}

/// Marks a deferred batch acknowledgment as issued.
pub async fn mark_acknowledged_queued(
    kv: &dyn KeyValueStore,
    kind: &str,
    id: &CorrelationId,
) -> Result<(), AtelierError> {
    kv.put(&ack_queue_key(kind, id), "1", Some(ACK_TTL)).await
}
