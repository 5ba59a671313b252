// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google API collaborators for the atelier router.
//!
//! Everything here is best-effort from the router's point of view: a
//! failed contacts upsert or ledger append is logged by the caller and
//! never blocks a routing decision.

pub mod contacts;
pub mod sheets;
pub mod token;

pub use contacts::GoogleContacts;
pub use sheets::{SheetIds, SheetsLedger};
pub use token::{OauthCredentials, TokenCache};
