// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the atelier mail router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, producing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level atelier configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to values
/// that route mail for the production atelier domain.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AtelierConfig {
    /// Service identity and logging.
    #[serde(default)]
    pub atelier: ServiceConfig,

    /// Mail routing addresses and acknowledgment switches.
    #[serde(default)]
    pub mail: MailConfig,

    /// Resend transactional provider settings.
    #[serde(default)]
    pub resend: ResendConfig,

    /// Google API settings (OAuth token, contacts directory, sheets).
    #[serde(default)]
    pub google: GoogleConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name of the service instance.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "heerawalla-atelier".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Mail routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MailConfig {
    /// Internal mailbox receiving accepted customer forwards.
    #[serde(default = "default_atelier_address")]
    pub forward_to: String,

    /// Optional mailbox receiving best-effort copies of rejected mail.
    #[serde(default)]
    pub forward_rejects_to: Option<String>,

    /// Reply-To set on outbound customer-facing mail.
    #[serde(default = "default_atelier_address")]
    pub reply_to: String,

    /// The atelier's own outbound sender address. Always counted as an
    /// internal sender.
    #[serde(default = "default_atelier_address")]
    pub outbound_address: String,

    /// Dedicated no-reply sink; mail addressed here is dropped.
    #[serde(default = "default_no_reply_address")]
    pub no_reply_address: String,

    /// Additional internal/staff sender addresses.
    #[serde(default)]
    pub internal_senders: Vec<String>,

    /// Send the customer acknowledgment email on accepted forwards.
    #[serde(default = "default_true")]
    pub send_ack: bool,

    /// Send the "please submit via the website" reject auto-reply.
    #[serde(default = "default_true")]
    pub send_reject: bool,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            forward_to: default_atelier_address(),
            forward_rejects_to: None,
            reply_to: default_atelier_address(),
            outbound_address: default_atelier_address(),
            no_reply_address: default_no_reply_address(),
            internal_senders: Vec::new(),
            send_ack: default_true(),
            send_reject: default_true(),
        }
    }
}

fn default_atelier_address() -> String {
    "atelier@heerawalla.com".to_string()
}

fn default_no_reply_address() -> String {
    "no-reply@heerawalla.com".to_string()
}

fn default_true() -> bool {
    true
}

/// Resend transactional provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResendConfig {
    /// API key. `None` disables outbound dispatch.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL (overridable for testing).
    #[serde(default = "default_resend_base_url")]
    pub base_url: String,
}

impl Default for ResendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_resend_base_url(),
        }
    }
}

fn default_resend_base_url() -> String {
    "https://api.resend.com".to_string()
}

/// Google API configuration for the best-effort collaborators.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GoogleConfig {
    /// OAuth client id. `None` disables all Google collaborators.
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: Option<String>,

    /// OAuth refresh token for the offline-access grant.
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Token endpoint (overridable for testing).
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// People API base URL (overridable for testing).
    #[serde(default = "default_people_base_url")]
    pub people_base_url: String,

    /// Sheets API base URL (overridable for testing).
    #[serde(default = "default_sheets_base_url")]
    pub sheets_base_url: String,

    /// Contact-group label applied to subscribed contacts.
    #[serde(default = "default_label_subscribed")]
    pub contact_label_subscribed: String,

    /// Contact-group label applied to unsubscribed contacts.
    #[serde(default = "default_label_unsubscribed")]
    pub contact_label_unsubscribed: String,

    /// Spreadsheet id for the orders ledger.
    #[serde(default)]
    pub order_sheet_id: Option<String>,

    /// Spreadsheet id for the quotes ledger.
    #[serde(default)]
    pub quote_sheet_id: Option<String>,

    /// Spreadsheet id for the contacts ledger.
    #[serde(default)]
    pub contacts_sheet_id: Option<String>,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            refresh_token: None,
            token_url: default_token_url(),
            people_base_url: default_people_base_url(),
            sheets_base_url: default_sheets_base_url(),
            contact_label_subscribed: default_label_subscribed(),
            contact_label_unsubscribed: default_label_unsubscribed(),
            order_sheet_id: None,
            quote_sheet_id: None,
            contacts_sheet_id: None,
        }
    }
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_people_base_url() -> String {
    "https://people.googleapis.com".to_string()
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_label_subscribed() -> String {
    "Heerawalla Subscribed".to_string()
}

fn default_label_unsubscribed() -> String {
    "Heerawalla Unsubscribed".to_string()
}
