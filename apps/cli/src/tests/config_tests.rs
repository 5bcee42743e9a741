use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_file(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("residence_cli_config_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(SETTINGS_FILE);
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn defaults_point_at_public_endpoint() {
    let settings = Settings::default();
    assert_eq!(settings.server_url, "wss://ws.binaryws.com/websockets/v3");
    assert_eq!(settings.app_id, "1089");
    assert_eq!(settings.response_timeout(), Duration::from_secs(30));
}

#[test]
fn overrides_accept_strings_and_numbers() {
    let mut settings = Settings::default();
    let values = HashMap::from([
        ("server_url", "ws://127.0.0.1:9000/ws"),
        ("response_timeout_secs", " 5 "),
    ]);
    apply_overrides(&mut settings, |key| values.get(key).map(|v| v.to_string()))
        .expect("apply overrides");
    assert_eq!(settings.server_url, "ws://127.0.0.1:9000/ws");
    assert_eq!(settings.response_timeout_secs, 5);
    assert_eq!(settings.app_id, "1089");
}

#[test]
fn rejects_non_numeric_timeout() {
    let mut settings = Settings::default();
    let err = apply_overrides(&mut settings, |key| {
        (key == "response_timeout_secs").then(|| "soon".to_string())
    })
    .expect_err("timeout must be numeric");
    assert!(err.to_string().contains("response_timeout_secs"));
}

#[test]
fn reads_settings_file() {
    let path = temp_settings_file(
        "server_url = \"ws://localhost:7000/websockets/v3\"\napp_id = 42\nlog_filter = \"debug\"\n",
    );
    let settings = load_settings(Some(&path)).expect("load settings");
    assert_eq!(settings.server_url, "ws://localhost:7000/websockets/v3");
    assert_eq!(settings.app_id, "42");
    assert_eq!(settings.log_filter, "debug");

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn missing_settings_file_falls_back_to_defaults() {
    let path = env::temp_dir().join("residence_cli_missing_settings.toml");
    let settings = load_settings(Some(&path)).expect("load settings");
    assert_eq!(settings.app_id, Settings::default().app_id);
}
