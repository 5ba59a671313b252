// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Origin Record reads and writes.

use atelier_core::{AtelierError, CorrelationId, KeyValueStore};
use tracing::warn;

use crate::keys::origin_key;
use crate::models::OriginRecord;
use crate::ORIGIN_TTL;

/// Upserts the Origin Record for a correlation ID.
///
/// Called for every external email carrying the ID: the latest
/// reply-from address deliberately refreshes the record. Internal
/// senders must never reach this function.
pub async fn record_origin(
    kv: &dyn KeyValueStore,
    id: &CorrelationId,
    record: &OriginRecord,
) -> Result<(), AtelierError> {
    let json = serde_json::to_string(record)
        .map_err(|e| AtelierError::Store { source: Box::new(e) })?;
    kv.put(&origin_key(id), &json, Some(ORIGIN_TTL)).await
}

/// Looks up the Origin Record for a correlation ID.
///
/// Absence (never existed, or expired) is a valid terminal state. A
/// corrupt stored value is logged and treated as absent rather than
/// failing the invocation.
pub async fn lookup_origin(
    kv: &dyn KeyValueStore,
    id: &CorrelationId,
) -> Result<Option<OriginRecord>, AtelierError> {
    let Some(json) = kv.get(&origin_key(id)).await? else {
        return Ok(None);
    };
    match serde_json::from_str(&json) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            warn!(correlation_id = %id, error = %e, "corrupt origin record, treating as absent");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryKv;

    #[tokio::test]
    async fn record_then_lookup() {
        let kv = MemoryKv::new();
        let id = CorrelationId::parse("QR7T2K").unwrap();
        let record = OriginRecord {
            email: "jane@example.com".into(),
            name: "Jane".into(),
        };

        record_origin(&kv, &id, &record).await.unwrap();
        let found = lookup_origin(&kv, &id).await.unwrap().unwrap();
        assert_eq!(found, record);
    }

    #[tokio::test]
    async fn lookup_absent_is_none() {
        let kv = MemoryKv::new();
        let id = CorrelationId::parse("NOSUCH").unwrap();
        assert!(lookup_origin(&kv, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_record_is_treated_as_absent() {
        let kv = MemoryKv::new();
        let id = CorrelationId::parse("QR7T2K").unwrap();
        kv.put(&origin_key(&id), "not json", None).await.unwrap();
        assert!(lookup_origin(&kv, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn identical_concurrent_writes_converge() {
        let kv = MemoryKv::new();
        let id = CorrelationId::parse("QR7T2K").unwrap();
        let record = OriginRecord {
            email: "jane@example.com".into(),
            name: "Jane".into(),
        };

        // Two rapid emails with the same new ID write identical records;
        // order does not matter.
        record_origin(&kv, &id, &record).await.unwrap();
        record_origin(&kv, &id, &record).await.unwrap();
        let found = lookup_origin(&kv, &id).await.unwrap().unwrap();
        assert_eq!(found.email, "jane@example.com");
    }
}
