// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared test doubles for the atelier workspace.

pub mod builders;
pub mod capture;

pub use builders::{inbound, raw_email, raw_email_with_headers};
pub use capture::CaptureDispatcher;
