use crate::shared::paths::{ensure_dir, get_storage_dir};
use crate::tasks::types::RefreshPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SETTINGS_FILE: &str = "settings.json";

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub refresh_policy: RefreshPolicy,
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Overrides the directory holding the database and logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            refresh_policy: RefreshPolicy::default(),
            log_filter: default_log_filter(),
            storage_dir: None,
        }
    }
}

impl AppSettings {
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(get_storage_dir)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.storage_dir().join("logs")
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn get_settings_path(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE)
}

/// Load settings from `dir`, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_settings(dir: &Path) -> AppSettings {
    let path = get_settings_path(dir);

    if !path.exists() {
        return AppSettings::default();
    }

    match load_settings_from_file(&path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(target: "system", "Ignoring invalid settings at {:?}: {}", path, e);
            AppSettings::default()
        }
    }
}

fn load_settings_from_file(path: &Path) -> Result<AppSettings, SettingsError> {
    let contents = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&contents)?;
    Ok(settings)
}

pub fn save_settings(dir: &Path, settings: &AppSettings) -> Result<(), SettingsError> {
    ensure_dir(dir)?;

    let path = get_settings_path(dir);
    let contents = serde_json::to_string_pretty(settings)?;
    std::fs::write(&path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(load_settings(tmp.path()), AppSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = AppSettings {
            refresh_policy: RefreshPolicy::Targeted,
            log_filter: "debug".to_string(),
            storage_dir: Some(tmp.path().join("data")),
        };

        save_settings(tmp.path(), &settings).unwrap();
        assert_eq!(load_settings(tmp.path()), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(SETTINGS_FILE),
            r#"{ "refreshPolicy": "targeted" }"#,
        )
        .unwrap();

        let settings = load_settings(tmp.path());
        assert_eq!(settings.refresh_policy, RefreshPolicy::Targeted);
        assert_eq!(settings.log_filter, "info");
        assert!(settings.storage_dir.is_none());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(SETTINGS_FILE), "not json").unwrap();

        assert_eq!(load_settings(tmp.path()), AppSettings::default());
    }

    #[test]
    fn test_log_dir_under_storage_dir() {
        let settings = AppSettings {
            storage_dir: Some(PathBuf::from("/tmp/tasklist-test")),
            ..AppSettings::default()
        };
        assert_eq!(settings.log_dir(), PathBuf::from("/tmp/tasklist-test/logs"));
    }
}
