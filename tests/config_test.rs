//! Tests for TOML configuration loading.

use edu_minigames::EngineConfig;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_defaults_from_empty_file() {
    let config = EngineConfig::from_toml("").expect("Empty config is valid");
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.log_filter(), "info");
    assert_eq!(config.service().base_url(), "http://127.0.0.1:8080");
    assert_eq!(*config.service().timeout_secs(), 10);
    assert!(!*config.session().from_module());
}

#[test]
fn test_partial_sections_keep_defaults() {
    let config = EngineConfig::from_toml(
        r#"
        [service]
        base_url = "https://juegos.example.org"
        "#,
    )
    .expect("Valid config");
    assert_eq!(config.service().base_url(), "https://juegos.example.org");
    assert_eq!(*config.service().timeout_secs(), 10);
    assert_eq!(config.log_filter(), "info");
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().expect("Temp file");
    writeln!(
        file,
        r#"
        log_filter = "edu_minigames=debug"

        [service]
        base_url = "http://localhost:9000"
        timeout_secs = 3

        [session]
        from_module = true
        "#
    )
    .expect("Write config");

    let config = EngineConfig::from_file(file.path()).expect("Config loads");
    assert_eq!(config.log_filter(), "edu_minigames=debug");
    assert_eq!(config.service().base_url(), "http://localhost:9000");
    assert_eq!(*config.service().timeout_secs(), 3);
    assert!(*config.session().from_module());
}

#[test]
fn test_invalid_toml_is_reported() {
    let error = EngineConfig::from_toml("[service\nbase_url = 1").expect_err("Malformed TOML");
    assert!(error.message.starts_with("Failed to parse config"));
}

#[test]
fn test_missing_file_is_reported() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let error = EngineConfig::from_file(dir.path().join("absent.toml")).expect_err("No such file");
    assert!(error.message.starts_with("Failed to read config file"));
}

#[test]
fn test_from_module_override() {
    let config = EngineConfig::default().with_from_module(true);
    assert!(*config.session().from_module());
}
