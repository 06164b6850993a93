use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::query::{ContainerQueryType, MediaQueryType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathError {
    MissingHomeDirectory,
}

pub const APP_DIR: &str = "responsive-tokens";
const ENGINE_CONFIG_FILE: &str = "config.json";

/// Engine-level settings from `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Theme file to load instead of `theme.json`. Relative paths are
    /// resolved against the config directory.
    #[serde(default)]
    pub theme_file: Option<PathBuf>,
    #[serde(default)]
    pub media_query_type: MediaQueryType,
    #[serde(default)]
    pub container_query_type: ContainerQueryType,
}

impl EngineConfig {
    /// Theme file this config selects, given the directory it was loaded from.
    pub fn theme_path(&self, config_dir: &Path, default_file: &str) -> PathBuf {
        match &self.theme_file {
            Some(path) => config_dir.join(path),
            None => config_dir.join(default_file),
        }
    }
}

#[derive(Debug, Error)]
enum ConfigLoadError {
    #[error("failed to read config.json: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config.json: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn load_engine_config() -> EngineConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_engine_config_with(xdg_config_home.as_deref(), home.as_deref())
}

pub(crate) fn load_engine_config_with(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> EngineConfig {
    let Ok(dir) = app_config_dir(xdg_config_home, home) else {
        return EngineConfig::default();
    };
    let path = dir.join(ENGINE_CONFIG_FILE);
    if !path.exists() {
        return EngineConfig::default();
    }
    read_engine_config(&path).unwrap_or_else(|err| {
        tracing::warn!(%err, ?path, "ignoring engine config; using defaults");
        EngineConfig::default()
    })
}

fn read_engine_config(path: &Path) -> Result<EngineConfig, ConfigLoadError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

/// `<config root>/responsive-tokens`, where the config root is
/// `$XDG_CONFIG_HOME` when set and non-empty, else `$HOME/.config`.
pub(crate) fn app_config_dir(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let root = match xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        Some(xdg) => xdg.to_path_buf(),
        None => home
            .ok_or(ConfigPathError::MissingHomeDirectory)?
            .join(".config"),
    };
    Ok(root.join(APP_DIR))
}

pub(crate) fn app_config_path(
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    Ok(app_config_dir(xdg_config_home, home)?.join(file_name))
}
