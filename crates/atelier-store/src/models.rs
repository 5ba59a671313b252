// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stored record types for thread state.

use serde::{Deserialize, Serialize};

/// Maximum number of lines kept in a stored Request Summary.
pub const SUMMARY_MAX_LINES: usize = 60;

/// Maximum number of characters kept in a stored Request Summary body.
pub const SUMMARY_MAX_CHARS: usize = 1800;

/// Marker line appended when a summary body was shortened.
pub const SUMMARY_TRUNCATION_MARK: &str = "[truncated]";

/// Who owns a correlation thread: the original customer's contact info,
/// used to route staff replies back to the right person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginRecord {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Snapshot of the original inquiry, appended to later staff forwards so
/// context survives long reply chains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSummary {
    pub subject: String,
    pub body: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
}

impl RequestSummary {
    /// Applies the line and character caps to the body, marking any cut.
    pub fn truncated(mut self) -> Self {
        self.body = truncate_body(&self.body);
        self
    }
}

/// Caps a summary body at [`SUMMARY_MAX_LINES`] lines and
/// [`SUMMARY_MAX_CHARS`] characters, appending the truncation mark when
/// anything was removed.
pub fn truncate_body(body: &str) -> String {
    let lines: Vec<&str> = body.split('\n').collect();
    let mut cut = false;

    let mut kept = if lines.len() > SUMMARY_MAX_LINES {
        cut = true;
        lines[..SUMMARY_MAX_LINES].join("\n")
    } else {
        body.to_string()
    };

    if kept.chars().count() > SUMMARY_MAX_CHARS {
        cut = true;
        kept = kept.chars().take(SUMMARY_MAX_CHARS).collect();
    }

    if cut {
        kept.push('\n');
        kept.push_str(SUMMARY_TRUNCATION_MARK);
    }
    kept
}
