use assay::config::{Config, ConfigError};
use std::fs;
use tempfile::tempdir;
use tracing::Level;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.store.uri, "http://localhost:7474");
    assert_eq!(config.store.database, "neo4j");
    assert_eq!(config.store.user, "neo4j");
    assert_eq!(config.store.password, None);
    assert_eq!(config.ner.url, None);
    assert_eq!(config.log.level(), Level::WARN);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[store]
uri = "http://graph.internal:7474"
password = "secret"

[log]
level = "debug"
"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.store.uri, "http://graph.internal:7474");
    assert_eq!(config.store.password.as_deref(), Some("secret"));
    assert_eq!(config.store.database, "neo4j");
    assert_eq!(config.log.level(), Level::DEBUG);
}

#[test]
fn test_ner_url() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[ner]\nurl = \"http://localhost:8000/ner\"\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.ner.url.as_deref(), Some("http://localhost:8000/ner"));
}

#[test]
fn test_unknown_level_falls_back_to_warn() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[log]\nlevel = \"chatty\"\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.log.level(), Level::WARN);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let result = Config::load(Some(path.as_path()));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
fn test_invalid_toml_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[store\nuri = ").unwrap();

    let result = Config::from_file(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_environment_overrides_file() {
    let mut config = Config::default();
    envmnt::set("ASSAY_STORE_DATABASE", "movies");
    config.apply_env();
    envmnt::remove("ASSAY_STORE_DATABASE");

    assert_eq!(config.store.database, "movies");
    assert_eq!(config.store.user, "neo4j");
}
