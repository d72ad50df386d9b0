//! Configuration tests
//!
//! Precedence and round-trip checks. Environment lookups go through a map so
//! tests never touch the real process environment.

use super::*;
use std::collections::HashMap;
use std::time::Duration;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).expect("test TOML should parse")
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// The generated template must parse back to the same values
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let reloaded = Config::from_sources(parsed.unwrap(), |_| None);
    assert_eq!(reloaded, config);
}

#[test]
fn test_config_roundtrip_custom_values() {
    let mut config = Config::default();
    config.api_url = "https://ans.example.com/api".to_string();
    config.page_size = 35;
    config.include_sem_despesas = true;
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let reloaded = Config::from_sources(parse(&config.to_toml()), |_| None);
    assert_eq!(reloaded, config);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_defaults_without_sources() {
    let config = Config::from_sources(FileConfig::default(), |_| None);
    assert_eq!(config.api_url, "http://localhost:8000/api");
    assert_eq!(config.page_size, 20);
    assert_eq!(config.legacy_page_size, 50);
    assert_eq!(config.timeout(), Duration::from_secs(30));
    assert!(!config.include_sem_despesas);
    assert_eq!(config.logging, LoggingConfig::default());
}

#[test]
fn test_file_overrides_defaults() {
    let file = parse(
        r#"
api_url = "http://file:9000/api"
page_size = 10
include_sem_despesas = true

[logging]
level = "debug"
file_rotation = "never"
"#,
    );

    let config = Config::from_sources(file, |_| None);
    assert_eq!(config.api_url, "http://file:9000/api");
    assert_eq!(config.page_size, 10);
    assert!(config.include_sem_despesas);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file_rotation, LogRotation::Never);
    assert_eq!(config.logging.file_prefix, "operadoras");
}

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
api_url = "http://file:9000/api"
page_size = 10
timeout_secs = 5
"#,
    );
    let env = env_from(&[
        ("OPERADORAS_API_URL", "http://env:7000/api"),
        ("OPERADORAS_PAGE_SIZE", "25"),
        ("OPERADORAS_TIMEOUT_SECS", "2"),
    ]);

    let config = Config::from_sources(file, env);
    assert_eq!(config.api_url, "http://env:7000/api");
    assert_eq!(config.page_size, 25);
    assert_eq!(config.timeout_secs, 2);
}

#[test]
fn test_unparseable_env_falls_back_to_file() {
    let file = parse("page_size = 10");
    let env = env_from(&[("OPERADORAS_PAGE_SIZE", "lots")]);

    let config = Config::from_sources(file, env);
    assert_eq!(config.page_size, 10);
}

#[test]
fn test_zero_page_size_is_clamped() {
    let file = parse("page_size = 0\nlegacy_page_size = 0");
    let config = Config::from_sources(file, |_| None);
    assert_eq!(config.page_size, 1);
    assert_eq!(config.legacy_page_size, 1);
}

#[test]
fn test_unknown_rotation_defaults_to_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
}
