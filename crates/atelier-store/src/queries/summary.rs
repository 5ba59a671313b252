// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request Summary reads and writes.

use atelier_core::{AtelierError, CorrelationId, KeyValueStore};
use tracing::warn;

use crate::keys::summary_key;
use crate::models::RequestSummary;
use crate::SUMMARY_TTL;

/// Stores the snapshot of an original inquiry, applying the line and
/// character caps before writing.
pub async fn record_summary(
    kv: &dyn KeyValueStore,
    id: &CorrelationId,
    summary: RequestSummary,
) -> Result<(), AtelierError> {
    let summary = summary.truncated();
    let json = serde_json::to_string(&summary)
        .map_err(|e| AtelierError::Store { source: Box::new(e) })?;
    kv.put(&summary_key(id), &json, Some(SUMMARY_TTL)).await
}

/// Looks up the stored summary; corrupt values degrade to absent.
pub async fn lookup_summary(
    kv: &dyn KeyValueStore,
    id: &CorrelationId,
) -> Result<Option<RequestSummary>, AtelierError> {
    let Some(json) = kv.get(&summary_key(id)).await? else {
        return Ok(None);
    };
    match serde_json::from_str(&json) {
        Ok(summary) => Ok(Some(summary)),
        Err(e) => {
            warn!(correlation_id = %id, error = %e, "corrupt request summary, treating as absent");
            Ok(None)
        }
    }
}
