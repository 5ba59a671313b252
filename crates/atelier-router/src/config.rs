// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routing configuration consumed by the classifier and router.

use std::collections::HashSet;

/// Addresses and switches governing one router instance.
///
/// The binary maps this from the loaded `atelier-config` model; tests
/// construct it directly.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Internal mailbox receiving accepted customer forwards.
    pub forward_to: String,
    /// Optional mailbox receiving best-effort copies of rejected mail.
    pub forward_rejects_to: Option<String>,
    /// Reply-To set on outbound mail.
    pub reply_to: String,
    /// The atelier's own outbound sender address; always internal.
    pub outbound_address: String,
    /// Dedicated no-reply sink; mail addressed here is dropped.
    pub no_reply_address: String,
    /// Additional internal/staff sender addresses.
    pub internal_senders: Vec<String>,
    /// Send the customer acknowledgment on accepted forwards.
    pub send_ack: bool,
    /// Send the reject auto-reply on unroutable external mail.
    pub send_reject: bool,
    /// Directory label attached when syncing accepted senders.
    pub contact_label: String,
}

impl RouterConfig {
    /// The lowercased internal-sender set, always including the
    /// atelier's own outbound address.
    pub fn internal_set(&self) -> HashSet<String> {
        let mut set: HashSet<String> = self
            .internal_senders
            .iter()
            .map(|s| s.trim().to_ascii_lowercase())
            .collect();
        set.insert(self.outbound_address.trim().to_ascii_lowercase());
        set
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            forward_to: "atelier@heerawalla.com".to_string(),
            forward_rejects_to: None,
            reply_to: "atelier@heerawalla.com".to_string(),
            outbound_address: "atelier@heerawalla.com".to_string(),
            no_reply_address: "no-reply@heerawalla.com".to_string(),
            internal_senders: Vec::new(),
            send_ack: true,
            send_reject: true,
            contact_label: "Heerawalla Subscribed".to_string(),
        }
    }
}
