// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the atelier mail router.

use thiserror::Error;

/// The primary error type used across all atelier collaborator traits and
/// core operations.
#[derive(Debug, Error)]
pub enum AtelierError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Key-value store errors (backend unreachable, serialization failure).
    #[error("store error: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Outbound dispatch errors (provider API failure, malformed recipient).
    #[error("dispatch error: {message}")]
    Dispatch {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Contacts directory errors (lookup or upsert failure).
    #[error("directory error: {message}")]
    Directory {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Tabular ledger errors (row append or read failure).
    #[error("ledger error: {message}")]
    Ledger {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Access token acquisition or refresh failure.
    #[error("auth error: {message}")]
    Auth {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
