use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use pretty_assertions::assert_eq;
use qapp_app::platform::config::{load_config, ConfigError, QappConfig, CONFIG_FILENAME};
use qapp_app::platform::logging::LogDestination;
use tempfile::TempDir;

#[test]
fn missing_file_gives_defaults() {
    let temp = TempDir::new().unwrap();
    let config = load_config(&temp.path().join(CONFIG_FILENAME)).unwrap();
    assert_eq!(config, QappConfig::default());
    assert_eq!(config.poll_interval(), Duration::from_millis(3_000));
    assert_eq!(config.api_settings().max_content_bytes, 16 * 1024 * 1024);
}

#[test]
fn partial_file_overrides_only_given_fields() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(CONFIG_FILENAME);
    fs::write(
        &path,
        r##"(
            api_base: "http://archive.local:9000/api/",
            poll_interval_ms: 5000,
            bridge_url: Some("http://127.0.0.1:12391/bridge"),
            theme: { "--mdc-theme-primary": "#6200ee" },
            popout_dir: "out",
            log_destination: Both,
        )"##,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.api_base, "http://archive.local:9000/api/");
    assert_eq!(config.poll_interval(), Duration::from_secs(5));
    assert_eq!(
        config.bridge_url.as_deref(),
        Some("http://127.0.0.1:12391/bridge")
    );
    assert_eq!(
        config.theme.get("--mdc-theme-primary").map(String::as_str),
        Some("#6200ee")
    );
    assert_eq!(config.popout_dir, PathBuf::from("out"));
    assert_eq!(config.log_destination, LogDestination::Both);
    assert_eq!(config.request_timeout_ms, QappConfig::default().request_timeout_ms);

    let api = config.api_settings();
    assert_eq!(api.base_url, "http://archive.local:9000/api/");
    assert_eq!(api.request_timeout, Duration::from_secs(30));
}

#[test]
fn invalid_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(CONFIG_FILENAME);
    fs::write(&path, "(poll_interval_ms: \"soon\")").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(CONFIG_FILENAME));
}

#[test]
fn zero_interval_is_clamped() {
    let config = QappConfig {
        poll_interval_ms: 0,
        ..QappConfig::default()
    };
    assert_eq!(config.poll_interval(), Duration::from_millis(1));
}
