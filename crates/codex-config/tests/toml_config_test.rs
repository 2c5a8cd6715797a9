//! TOML config file tests
//!
//! Parses whole config files the way users write them.

use codex_config::{CodexConfig, ConfigError, RmApiConfig, UnknownPubTypePolicy};

const FULL_CONFIG: &str = r#"
[rmapi]
customer_id = "examplecorp"
api_key = "8675309"
url = "https://rmapi.example.com"

[translate]
default_limit = 20
unknown_pub_type = "map_to_unknown"
"#;

#[test]
fn test_full_config() {
    let config = CodexConfig::from_toml(FULL_CONFIG).unwrap();

    let rmapi = config.rmapi.as_ref().unwrap();
    assert_eq!(rmapi, &RmApiConfig::new("examplecorp", "8675309", "https://rmapi.example.com"));
    rmapi.validate().unwrap();

    assert_eq!(config.translate.default_limit, 20);
    assert_eq!(config.translate.unknown_pub_type, UnknownPubTypePolicy::MapToUnknown);
}

#[test]
fn test_empty_file_uses_defaults() {
    let config = CodexConfig::from_toml("").unwrap();

    assert!(config.rmapi.is_none());
    assert_eq!(config.translate.default_limit, 10);
    assert_eq!(config.translate.unknown_pub_type, UnknownPubTypePolicy::Reject);
}

#[test]
fn test_partial_rmapi_section_fails_validation() {
    let config = CodexConfig::from_toml("[rmapi]\ncustomer_id = \"examplecorp\"\n").unwrap();

    let err = config.rmapi.unwrap().validate().unwrap_err();
    assert!(matches!(err, ConfigError::Missing { ref field } if field == "api_key"));
}

#[test]
fn test_unknown_policy_value_rejected() {
    let err = CodexConfig::from_toml("[translate]\nunknown_pub_type = \"ignore\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_redacted_output_reparses() {
    let config = CodexConfig::from_toml(FULL_CONFIG).unwrap();
    let redacted = config.to_redacted_toml();

    assert!(!redacted.contains("8675309"));

    let reparsed = CodexConfig::from_toml(&redacted).unwrap();
    assert_eq!(reparsed.translate, config.translate);
    assert_eq!(reparsed.rmapi.unwrap().customer_id, "examplecorp");
}
