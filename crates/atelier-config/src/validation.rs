// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: address shapes, paired credentials, known log levels.

use atelier_core::types::is_valid_email;

use crate::diagnostic::ConfigError;
use crate::model::AtelierConfig;

const KNOWN_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &AtelierConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !KNOWN_LOG_LEVELS.contains(&config.atelier.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "atelier.log_level `{}` is not one of {}",
                config.atelier.log_level,
                KNOWN_LOG_LEVELS.join(", ")
            ),
        });
    }

    for (key, value) in [
        ("mail.forward_to", &config.mail.forward_to),
        ("mail.reply_to", &config.mail.reply_to),
        ("mail.outbound_address", &config.mail.outbound_address),
        ("mail.no_reply_address", &config.mail.no_reply_address),
    ] {
        if !is_valid_email(value) {
            errors.push(ConfigError::Validation {
                message: format!("{key} `{value}` is not a valid email address"),
            });
        }
    }

    if let Some(rejects) = &config.mail.forward_rejects_to {
        if !is_valid_email(rejects) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "mail.forward_rejects_to `{rejects}` is not a valid email address"
                ),
            });
        }
    }

    for (i, sender) in config.mail.internal_senders.iter().enumerate() {
        if !is_valid_email(sender) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "mail.internal_senders[{i}] `{sender}` is not a valid email address"
                ),
            });
        }
    }

    if let Some(key) = &config.resend.api_key {
        if key.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "resend.api_key must not be blank when set".to_string(),
            });
        }
    }

    // Google credentials travel as a set: any one present requires all three.
    let google = &config.google;
    let creds = [
        ("google.client_id", &google.client_id),
        ("google.client_secret", &google.client_secret),
        ("google.refresh_token", &google.refresh_token),
    ];
    if creds.iter().any(|(_, v)| v.is_some()) {
        for (key, value) in creds {
            if value.is_none() {
                errors.push(ConfigError::Validation {
                    message: format!("{key} is required when any Google credential is set"),
                });
            }
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
