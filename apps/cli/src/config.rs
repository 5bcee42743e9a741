use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::Context;

pub const SETTINGS_FILE: &str = "residence_cli.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub app_id: String,
    pub log_filter: String,
    pub response_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "wss://ws.binaryws.com/websockets/v3".into(),
            app_id: "1089".into(),
            log_filter: "info".into(),
            response_timeout_secs: 30,
        }
    }
}

impl Settings {
    pub fn response_timeout(&self) -> Duration {
        Duration::from_secs(self.response_timeout_secs)
    }
}

/// Defaults, then the settings file (if present), then `APP__*` variables.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = path.unwrap_or_else(|| Path::new(SETTINGS_FILE));
    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
        apply_overrides(&mut settings, |key| {
            file_cfg.get(key).map(|value| match value {
                toml::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        })?;
    }

    apply_overrides(&mut settings, |key| {
        std::env::var(format!("APP__{}", key.to_ascii_uppercase())).ok()
    })?;

    Ok(settings)
}

fn apply_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("server_url") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("app_id") {
        settings.app_id = v;
    }
    if let Some(v) = lookup("log_filter") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("response_timeout_secs") {
        settings.response_timeout_secs = v
            .trim()
            .parse()
            .with_context(|| format!("invalid response_timeout_secs '{v}'"))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
