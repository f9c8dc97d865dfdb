use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;

pub const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub script_interpreter: String,
    pub script_path: String,
    pub script_timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8000".into(),
            script_interpreter: "python".into(),
            script_path: "../exam-parser/tiet_papers_downloader.py".into(),
            script_timeout_seconds: 120,
        }
    }
}

impl Settings {
    pub fn script_timeout(&self) -> Duration {
        Duration::from_secs(self.script_timeout_seconds)
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    settings_from_sources(file.as_deref(), |name| std::env::var(name).ok())
}

/// Defaults, then `server.toml`, then environment. Unparseable values are skipped.
pub(crate) fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<toml::Table>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr").and_then(|v| v.as_str()) {
                    settings.server_bind = v.to_string();
                }
                if let Some(v) = file_cfg.get("script_interpreter").and_then(|v| v.as_str()) {
                    settings.script_interpreter = v.to_string();
                }
                if let Some(v) = file_cfg.get("script_path").and_then(|v| v.as_str()) {
                    settings.script_path = v.to_string();
                }
                if let Some(v) = file_cfg
                    .get("script_timeout_seconds")
                    .and_then(|v| v.as_integer())
                    .and_then(|v| u64::try_from(v).ok())
                {
                    settings.script_timeout_seconds = v;
                }
            }
            Err(err) => tracing::warn!(file = SETTINGS_FILE, error = %err, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("APP__SCRIPT_INTERPRETER") {
        settings.script_interpreter = v;
    }
    if let Some(v) = env("APP__SCRIPT_PATH") {
        settings.script_path = v;
    }

    if let Some(v) = env("APP__SCRIPT_TIMEOUT_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.script_timeout_seconds = parsed;
        }
    }

    settings
}

/// Resolves the downloader path against the working directory. The file
/// does not have to exist yet.
pub fn prepare_script_path(raw_script_path: &str) -> anyhow::Result<PathBuf> {
    let raw_script_path = raw_script_path.trim();
    let path = if raw_script_path.is_empty() {
        PathBuf::from(Settings::default().script_path)
    } else {
        PathBuf::from(raw_script_path)
    };

    std::path::absolute(&path).with_context(|| {
        format!(
            "failed to resolve script path '{}' against the working directory",
            path.display()
        )
    })
}

pub fn script_exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
