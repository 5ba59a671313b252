// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions for the atelier router.
//!
//! External services (transactional email provider, key-value store,
//! contacts directory, spreadsheet ledger) are consumed through these
//! seams with `#[async_trait]` for dynamic dispatch.

pub mod directory;
pub mod dispatch;
pub mod kv;
pub mod ledger;

// Re-export all traits at the traits module level for convenience.
pub use directory::ContactDirectory;
pub use dispatch::OutboundDispatcher;
pub use kv::KeyValueStore;
pub use ledger::TabularLedger;
