// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tabular ledger trait (generic append/read row store).

use async_trait::async_trait;

use crate::error::AtelierError;
use crate::types::LedgerKind;

/// Generic tabular append store backed by spreadsheet-hosted sheets.
///
/// A best-effort collaborator, same policy as [`super::ContactDirectory`].
#[async_trait]
pub trait TabularLedger: Send + Sync {
    /// Appends one row to the sheet identified by `kind`.
    async fn append(&self, kind: LedgerKind, row: Vec<String>) -> Result<(), AtelierError>;
}
