// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TTL-aware in-memory key-value backend for development and tests.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use atelier_core::{AtelierError, KeyValueStore};

/// In-memory [`KeyValueStore`] with lazy expiration.
///
/// Entries past their deadline are dropped on read. Not meant for
/// production retention windows; the deployed store is the edge
/// platform's KV namespace behind the same trait.
#[derive(Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, Entry>>,
}

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries; test helper.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .await
            .values()
            .filter(|e| e.expires_at.is_none_or(|at| at > now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, AtelierError> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) => {
                if entry.expires_at.is_some_and(|at| at <= Instant::now()) {
                    entries.remove(key);
                    return Ok(None);
                }
                Ok(Some(entry.value.clone()))
            }
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), AtelierError> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: ttl.map(|d| Instant::now() + d),
        };
        self.entries.lock().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AtelierError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_delete_round_trip() {
        let kv = MemoryKv::new();
        kv.put("k", "v", None).await.unwrap();
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("v"));

        kv.delete("k").await.unwrap();
        assert!(kv.get("k").await.unwrap().is_none());
        // Deleting an absent key is not an error.
        kv.delete("k").await.unwrap();
    }

    #[tokio::test]
    async fn expired_entries_read_as_absent() {
        let kv = MemoryKv::new();
        kv.put("k", "v", Some(Duration::from_millis(10))).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(kv.get("k").await.unwrap().is_none());
        assert!(kv.is_empty().await);
    }

    #[tokio::test]
    async fn overwrite_replaces_value_and_ttl() {
        let kv = MemoryKv::new();
        kv.put("k", "v1", Some(Duration::from_millis(10))).await.unwrap();
        kv.put("k", "v2", None).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("v2"));
    }
}
