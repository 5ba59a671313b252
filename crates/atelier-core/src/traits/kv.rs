// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value store trait for thread state, idempotency markers, and
//! rate buckets.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::AtelierError;

/// Expiring string key-value storage.
///
/// Keys are namespaced by purpose prefix plus a normalized correlation ID
/// or email address (see `atelier-store`). TTLs are advisory: a backend
/// may expire late, never early.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a value; `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, AtelierError>;

    /// Writes a value with an optional expiration.
    async fn put(&self, key: &str, value: &str, ttl: Option<Duration>)
        -> Result<(), AtelierError>;

    /// Removes a key; removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), AtelierError>;
}
