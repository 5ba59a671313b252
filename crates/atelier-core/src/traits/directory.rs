// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contacts directory trait (upsert-by-email sync).

use async_trait::async_trait;

use crate::error::AtelierError;
use crate::types::EmailAddress;

/// Upsert-by-email contacts directory.
///
/// A best-effort collaborator: the router logs failures and continues;
/// directory state never gates a routing decision.
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    /// Creates or updates the directory entry for `email`, attaching
    /// `label` (e.g. the subscribed/unsubscribed membership label).
    async fn upsert(
        &self,
        email: &EmailAddress,
        name: &str,
        label: &str,
    ) -> Result<(), AtelierError>;
}
