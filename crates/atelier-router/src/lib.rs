// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Email-reply routing and reply-thread reconciliation.
//!
//! One inbound email enters, exactly one terminal outcome leaves:
//! skipped (no-reply sink, auto/bulk), dropped (unroutable, expired
//! thread), an internal staff reply routed back to the thread's
//! customer, a reject auto-reply, or an accepted forward with an
//! idempotent acknowledgment. Wrong routing leaks fragments of previous
//! threads across customers; the transition order in [`route`] is the
//! contract.

pub mod classify;
pub mod config;
pub mod route;
pub mod templates;

pub use classify::{Classification, SkipReason, UnroutableReason, classify};
pub use config::RouterConfig;
pub use route::{DropReason, RouteOutcome, Router};
