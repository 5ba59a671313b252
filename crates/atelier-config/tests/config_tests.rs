// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the atelier configuration system.

use atelier_config::diagnostic::ConfigError;
use atelier_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_atelier_config() {
    let toml = r#"
[atelier]
name = "test-atelier"
log_level = "debug"

[mail]
forward_to = "studio@heerawalla.com"
forward_rejects_to = "rejects@heerawalla.com"
reply_to = "atelier@heerawalla.com"
outbound_address = "atelier@heerawalla.com"
no_reply_address = "no-reply@heerawalla.com"
internal_senders = ["staff@heerawalla.com"]
send_ack = false
send_reject = true

[resend]
api_key = "re_test_123"

[google]
client_id = "cid"
client_secret = "secret"
refresh_token = "rt"
order_sheet_id = "sheet-1"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.atelier.name, "test-atelier");
    assert_eq!(config.atelier.log_level, "debug");
    assert_eq!(config.mail.forward_to, "studio@heerawalla.com");
    assert_eq!(
        config.mail.forward_rejects_to.as_deref(),
        Some("rejects@heerawalla.com")
    );
    assert_eq!(config.mail.internal_senders, vec!["staff@heerawalla.com"]);
    assert!(!config.mail.send_ack);
    assert!(config.mail.send_reject);
    assert_eq!(config.resend.api_key.as_deref(), Some("re_test_123"));
    assert_eq!(config.google.order_sheet_id.as_deref(), Some("sheet-1"));
}

/// Unknown field in [mail] section is rejected.
#[test]
fn unknown_field_in_mail_produces_error() {
    let toml = r#"
[mail]
forwad_to = "x@example.com"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("forwad_to"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.atelier.name, "heerawalla-atelier");
    assert_eq!(config.atelier.log_level, "info");
    assert_eq!(config.mail.forward_to, "atelier@heerawalla.com");
    assert_eq!(config.mail.reply_to, "atelier@heerawalla.com");
    assert_eq!(config.mail.no_reply_address, "no-reply@heerawalla.com");
    assert!(config.mail.forward_rejects_to.is_none());
    assert!(config.mail.internal_senders.is_empty());
    assert!(config.mail.send_ack);
    assert!(config.mail.send_reject);
    assert!(config.resend.api_key.is_none());
    assert_eq!(config.resend.base_url, "https://api.resend.com");
    assert!(config.google.client_id.is_none());
    assert_eq!(
        config.google.contact_label_subscribed,
        "Heerawalla Subscribed"
    );
}

/// Validation runs after deserialization and reports all failures.
#[test]
fn validation_collects_all_errors() {
    let toml = r#"
[atelier]
log_level = "loud"

[mail]
forward_to = "not-an-address"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.len() >= 2, "expected both errors, got: {errors:?}");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))
    ));
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("forward_to"))
    ));
}

/// A valid configuration passes end-to-end load + validate.
#[test]
fn valid_config_passes_load_and_validate() {
    let toml = r#"
[mail]
internal_senders = ["owner@heerawalla.com", "bench@heerawalla.com"]

[resend]
api_key = "re_live_abc"
"#;

    let config = load_and_validate_str(toml).expect("should validate");
    assert_eq!(config.mail.internal_senders.len(), 2);
}
