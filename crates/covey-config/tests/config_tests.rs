// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Covey configuration system.

use covey_config::load_config_from_str;

/// Valid TOML with all known sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_covey_config() {
    let toml = r#"
[agent]
name = "test-responder"
log_level = "debug"
qr_wait_timeout_secs = 30

[storage]
database_path = "/tmp/test.db"

[media]
root_dir = "/tmp/media"

[transport]
auth_dir = "/tmp/sessions"

[behavior]
enable_random_ignore = false
ignore_probability = 0.5
reply_delay_min_ms = 100
reply_delay_max_ms = 200

[replies]
text = ["ok"]
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "test-responder");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.agent.qr_wait_timeout_secs, 30);
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert_eq!(config.media.root_dir, "/tmp/media");
    assert_eq!(config.transport.auth_dir, "/tmp/sessions");
    assert!(!config.behavior.enable_random_ignore);
    assert_eq!(config.behavior.ignore_probability, 0.5);
    assert_eq!(config.behavior.reply_delay_min_ms, 100);
    assert_eq!(config.behavior.reply_delay_max_ms, 200);
    assert_eq!(config.replies.text, vec!["ok"]);
    config.validate().expect("config should validate");
}

/// Omitted sections fall back to compiled defaults.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should deserialize");
    assert_eq!(config.agent.name, "covey");
    assert_eq!(config.storage.database_path, "covey.db");
    assert_eq!(config.behavior.ignore_probability, 0.30);
    assert!(config.replies.text.is_empty());
}

/// Unknown field in a section is rejected at load time.
#[test]
fn unknown_field_produces_error() {
    let toml = r#"
[agent]
naem = "test"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("naem"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Out-of-range behavior values survive deserialization but fail validate().
#[test]
fn validation_catches_bad_ranges() {
    let toml = r#"
[behavior]
long_delay_probability = 2.0
"#;
    let config = load_config_from_str(toml).expect("deserializes");
    assert!(config.validate().is_err());
}
