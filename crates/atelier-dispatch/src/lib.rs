// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound dispatch backends.
//!
//! One concrete [`atelier_core::OutboundDispatcher`] implementation ships
//! here: the Resend transactional HTTP API. The router only sees the
//! trait.

pub mod resend;

pub use resend::ResendDispatcher;
