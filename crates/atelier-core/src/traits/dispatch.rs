// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound dispatcher trait for transactional email providers.

use async_trait::async_trait;

use crate::error::AtelierError;
use crate::types::OutboundEmail;

/// Delivers a fully composed message through whichever transactional
/// provider is configured.
///
/// Implementations must honor `extra_headers` verbatim; the router relies
/// on being able to set `Auto-Submitted: auto-replied` on its own
/// auto-replies to break autoresponder loops.
#[async_trait]
pub trait OutboundDispatcher: Send + Sync {
    /// Returns the provider name, used in log fields only.
    fn name(&self) -> &str;

    /// Sends one message. A returned error means the message was not
    /// accepted by the provider; partial-delivery states are the
    /// provider's concern.
    async fn send(&self, email: &OutboundEmail) -> Result<(), AtelierError>;
}
