// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subscription markers and the hourly rate bucket shared with the
//! intake side of the namespace.

use atelier_core::{AtelierError, EmailAddress, KeyValueStore};
use chrono::{DateTime, Utc};

use crate::keys::{rate_key, subscribed_key, unsubscribed_key};
use crate::RATE_TTL;

/// Submissions allowed per source IP per hour bucket.
pub const MAX_SUBMISSIONS_PER_HOUR: u32 = 5;

/// Marks an address as subscribed and clears any unsubscription marker.
pub async fn mark_subscribed(
    kv: &dyn KeyValueStore,
    email: &EmailAddress,
) -> Result<(), AtelierError> {
    kv.put(&subscribed_key(email), "1", None).await?;
    kv.delete(&unsubscribed_key(email)).await
}

/// Marks an address as unsubscribed and clears the subscription marker.
pub async fn mark_unsubscribed(
    kv: &dyn KeyValueStore,
    email: &EmailAddress,
) -> Result<(), AtelierError> {
    kv.put(&unsubscribed_key(email), "1", None).await?;
    kv.delete(&subscribed_key(email)).await
}

/// True when the address has opted out of marketing mail.
pub async fn is_unsubscribed(
    kv: &dyn KeyValueStore,
    email: &EmailAddress,
) -> Result<bool, AtelierError> {
    Ok(kv.get(&unsubscribed_key(email)).await?.is_some())
}

/// Increments the hourly rate bucket for `(scope, ip)` and reports
/// whether the submission is still within [`MAX_SUBMISSIONS_PER_HOUR`].
pub async fn rate_check_and_increment(
    kv: &dyn KeyValueStore,
    scope: &str,
    ip: &str,
    now: DateTime<Utc>,
) -> Result<bool, AtelierError> {
    let key = rate_key(scope, ip, now);
    let count: u32 = kv
        .get(&key)
        .await?
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    if count >= MAX_SUBMISSIONS_PER_HOUR {
        return Ok(false);
    }
    kv.put(&key, &(count + 1).to_string(), Some(RATE_TTL)).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryKv;

    #[tokio::test]
    async fn subscription_markers_are_exclusive() {
        let kv = MemoryKv::new();
        let email = EmailAddress::parse("jane@example.com").unwrap();

        mark_unsubscribed(&kv, &email).await.unwrap();
        assert!(is_unsubscribed(&kv, &email).await.unwrap());

        mark_subscribed(&kv, &email).await.unwrap();
        assert!(!is_unsubscribed(&kv, &email).await.unwrap());
    }

    #[tokio::test]
    async fn rate_bucket_caps_per_hour() {
        let kv = MemoryKv::new();
        let now = Utc::now();

        for _ in 0..MAX_SUBMISSIONS_PER_HOUR {
            assert!(rate_check_and_increment(&kv, "contact", "203.0.113.9", now)
                .await
                .unwrap());
        }
        assert!(!rate_check_and_increment(&kv, "contact", "203.0.113.9", now)
            .await
            .unwrap());
        // A different IP is unaffected.
        assert!(rate_check_and_increment(&kv, "contact", "198.51.100.4", now)
            .await
            .unwrap());
    }
}
