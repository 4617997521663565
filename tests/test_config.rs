//! # Tests für das Laden und Validieren des Ledger-Regelwerks

use giftcard_lib::{
    load_ledger_config, GiftCardCoreError, LedgerConfig, DEFAULT_MINIMUM_VALUE,
    DEFAULT_VALIDITY_DAYS,
};

#[test]
fn test_default_config_carries_the_production_constants() {
    let config = LedgerConfig::default();
    assert_eq!(config.validity_period_days, Some(DEFAULT_VALIDITY_DAYS));
    assert_eq!(config.minimum_value, DEFAULT_MINIMUM_VALUE);
    assert_eq!(DEFAULT_VALIDITY_DAYS, 365);
    assert_eq!(DEFAULT_MINIMUM_VALUE, 1_000_000_000_000_000);
}

#[test]
fn test_load_config_from_toml() {
    let toml_str = r#"
        validity_period_days = 90
        minimum_value = 5000
    "#;
    let config = load_ledger_config(toml_str).unwrap();
    assert_eq!(config.validity_period_days, Some(90));
    assert_eq!(config.minimum_value, 5000);
    assert_eq!(
        config.validity_period().unwrap(),
        chrono::Duration::days(90)
    );
}

#[test]
fn test_missing_fields_fall_back_to_defaults() {
    let config = load_ledger_config("").unwrap();
    assert_eq!(config, LedgerConfig::default());
}

#[test]
fn test_zero_validity_means_no_expiration() {
    // TOML kennt kein null; 0 Tage stehen für "läuft nie ab".
    let config = load_ledger_config("validity_period_days = 0").unwrap();
    assert_eq!(config.validity_period_days, None);
    assert_eq!(config.validity_period(), None);
}

#[test]
fn test_zero_minimum_value_is_rejected() {
    let err = load_ledger_config("minimum_value = 0").unwrap_err();
    assert!(
        matches!(err, GiftCardCoreError::Ledger(_)),
        "Expected a ledger rule error, got {:?}",
        err
    );
}

#[test]
fn test_unknown_fields_are_rejected() {
    // Tippfehler im Regelwerk dürfen nicht stillschweigend ignoriert werden.
    let err = load_ledger_config("validity_perod_days = 90").unwrap_err();
    assert!(matches!(err, GiftCardCoreError::Toml(_)));
}

#[test]
fn test_config_survives_serde_round_trip() {
    let config = LedgerConfig {
        validity_period_days: None,
        minimum_value: 42,
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: LedgerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);
    assert_eq!(back.validity_period(), None);
}
