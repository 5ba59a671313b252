// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thread-state persistence for the atelier router.
//!
//! A namespaced key-value layer holding Origin Records, Request
//! Summaries, acknowledgment markers, subscription marks, and rate
//! buckets, with typed accessors per record family and an in-memory
//! TTL backend for development and tests.

use std::time::Duration;

pub mod keys;
pub mod memory;
pub mod models;
pub mod queries;

pub use memory::MemoryKv;
pub use models::{OriginRecord, RequestSummary};

/// Retention window for Origin Records: 180 days.
pub const ORIGIN_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 180);

/// Retention window for Request Summaries, independent of the origin TTL.
pub const SUMMARY_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 180);

/// Retention window for acknowledgment markers. Matches the thread-state
/// window: a re-acknowledgment after full expiry is acceptable.
pub const ACK_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 180);

/// Lifetime of an hourly rate bucket.
pub const RATE_TTL: Duration = Duration::from_secs(60 * 60);
