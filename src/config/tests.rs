//! Tests for the configuration system: validation, presets, environment
//! parsing and file round trips.

use super::*;
use crate::error::ForwardError;
use std::env;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_default_is_valid() {
    let config = RegistryConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.max_nodes, None);
    assert!(config.log_mutations);
}

#[test]
fn test_all_presets_valid() {
    assert!(RegistryConfig::performance_preset().validate().is_ok());
    assert!(RegistryConfig::memory_preset().validate().is_ok());
    assert!(RegistryConfig::realtime_preset().validate().is_ok());
    assert!(RegistryConfig::balanced_preset().validate().is_ok());
}

#[test]
fn test_preset_characteristics() {
    let perf = RegistryConfig::performance_preset();
    let mem = RegistryConfig::memory_preset();
    let rt = RegistryConfig::realtime_preset();

    assert!(perf.initial_capacity > mem.initial_capacity);
    assert!(rt.max_nodes.is_some());
    assert!(perf.max_nodes.is_none());
    assert_eq!(RegistryConfig::balanced_preset(), RegistryConfig::default());
}

#[test]
fn test_validation_failures() {
    let zero_nodes = RegistryConfig { max_nodes: Some(0), ..Default::default() };
    assert!(matches!(zero_nodes.validate(), Err(ForwardError::Configuration { .. })));

    let zero_len = RegistryConfig { max_number_len: Some(0), ..Default::default() };
    assert!(zero_len.validate().is_err());

    let over_capacity = RegistryConfig {
        initial_capacity: 100,
        max_nodes: Some(10),
        ..Default::default()
    };
    let err = over_capacity.validate().unwrap_err();
    assert!(err.to_string().contains("initial_capacity"));
}

#[test]
fn test_accepts_len() {
    let config = RegistryConfig { max_number_len: Some(3), ..Default::default() };
    assert!(config.accepts_len("123"));
    assert!(!config.accepts_len("1234"));
    assert!(RegistryConfig::default().accepts_len(&"1".repeat(10_000)));
}

#[test]
fn test_from_env_with_prefix() {
    let prefix = "PHFWD_TEST_ENV_";
    env::set_var(format!("{}INITIAL_CAPACITY", prefix), "8");
    env::set_var(format!("{}MAX_NODES", prefix), "500");
    env::set_var(format!("{}MAX_NUMBER_LEN", prefix), "0");
    env::set_var(format!("{}LOG_MUTATIONS", prefix), "off");

    let config = RegistryConfig::from_env_with_prefix(prefix).unwrap();
    assert_eq!(config.initial_capacity, 8);
    assert_eq!(config.max_nodes, Some(500));
    assert_eq!(config.max_number_len, None);
    assert!(!config.log_mutations);

    for field in ["INITIAL_CAPACITY", "MAX_NODES", "MAX_NUMBER_LEN", "LOG_MUTATIONS"] {
        env::remove_var(format!("{}{}", prefix, field));
    }
}

#[test]
fn test_from_env_rejects_invalid_combination() {
    let prefix = "PHFWD_TEST_BAD_";
    env::set_var(format!("{}INITIAL_CAPACITY", prefix), "1000");
    env::set_var(format!("{}MAX_NODES", prefix), "10");

    assert!(RegistryConfig::from_env_with_prefix(prefix).is_err());

    env::remove_var(format!("{}INITIAL_CAPACITY", prefix));
    env::remove_var(format!("{}MAX_NODES", prefix));
}

#[test]
fn test_unparsable_env_falls_back_to_default() {
    let prefix = "PHFWD_TEST_GARBAGE_";
    env::set_var(format!("{}INITIAL_CAPACITY", prefix), "lots");

    let config = RegistryConfig::from_env_with_prefix(prefix).unwrap();
    assert_eq!(config.initial_capacity, RegistryConfig::default().initial_capacity);

    env::remove_var(format!("{}INITIAL_CAPACITY", prefix));
}

#[test]
fn test_parse_env_bool_values() {
    let var = "PHFWD_TEST_BOOL_VALUE";
    for (value, expected) in [("TRUE", true), ("1", true), ("yes", true), ("On", true), ("no", false)] {
        env::set_var(var, value);
        assert_eq!(parse_env_bool(var, !expected), expected);
    }
    env::remove_var(var);
    assert!(parse_env_bool(var, true));
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("registry.json");

    let config = RegistryConfig::realtime_preset();
    config.save_to_file(&path).unwrap();

    let loaded = RegistryConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_invalid_file() {
    let dir = tempdir().unwrap();

    let garbage = dir.path().join("garbage.json");
    fs::write(&garbage, "{ not json").unwrap();
    assert!(matches!(
        RegistryConfig::load_from_file(&garbage),
        Err(ForwardError::Configuration { .. })
    ));

    let invalid = dir.path().join("invalid.json");
    fs::write(
        &invalid,
        r#"{"initial_capacity": 4, "max_nodes": 0, "max_number_len": null, "log_mutations": true}"#,
    )
    .unwrap();
    assert!(RegistryConfig::load_from_file(&invalid).is_err());

    let missing = dir.path().join("missing.json");
    assert!(matches!(RegistryConfig::load_from_file(&missing), Err(ForwardError::Io(_))));
}
