use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::breakpoints::{extract_breakpoints, Breakpoints};
use crate::config::{app_config_path, config_env_dirs, ConfigPathError};
use crate::responsive::ResponsiveValue;
use crate::tokens::TokenValue;

pub const THEME_CONFIG_FILE: &str = "theme.json";

pub type ThemeResult<T> = std::result::Result<T, ThemeError>;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("failed to read theme config: {path}")]
    ReadConfig { path: PathBuf, source: io::Error },
    #[error("failed to parse theme config")]
    ParseConfig(#[from] serde_json::Error),
}

impl From<ConfigPathError> for ThemeError {
    fn from(error: ConfigPathError) -> Self {
        match error {
            ConfigPathError::MissingHomeDirectory => Self::MissingHomeDirectory,
        }
    }
}

/// Token id -> responsive override for one token category.
pub type TokenOverrides = IndexMap<String, ResponsiveValue<TokenValue>>;

/// Theme breakpoints plus per-category responsive token overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub breakpoints: Option<Breakpoints>,
    #[serde(default)]
    pub colors: TokenOverrides,
    #[serde(default)]
    pub typography: TokenOverrides,
    #[serde(default)]
    pub spacing: TokenOverrides,
    #[serde(default, alias = "borderRadius")]
    pub border_radius: TokenOverrides,
    #[serde(default)]
    pub shadows: TokenOverrides,
    #[serde(default, alias = "zIndices")]
    pub z_indices: TokenOverrides,
    #[serde(default)]
    pub animations: TokenOverrides,
}

impl ThemeConfig {
    pub fn from_json_str(serialized: &str) -> ThemeResult<Self> {
        Ok(serde_json::from_str(serialized)?)
    }

    /// Active registry for this theme. See [`extract_breakpoints`].
    pub fn resolved_breakpoints(&self) -> Breakpoints {
        extract_breakpoints(Some(self))
    }
}

/// Theme from `theme.json` in the user config directory.
pub fn load_theme_config() -> ThemeResult<ThemeConfig> {
    let (xdg_config_home, home) = config_env_dirs();
    load_theme_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_theme_config_with(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> ThemeResult<ThemeConfig> {
    let path = app_config_path(THEME_CONFIG_FILE, xdg_config_home, home)?;
    load_theme_config_from(&path)
}

/// Theme at `path`; the default theme when the file does not exist.
pub fn load_theme_config_from(path: &Path) -> ThemeResult<ThemeConfig> {
    if !path.exists() {
        tracing::debug!(?path, "no theme config; using default breakpoints");
        return Ok(ThemeConfig::default());
    }

    let serialized = fs::read_to_string(path).map_err(|source| ThemeError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ThemeConfig::from_json_str(&serialized)?;
    tracing::debug!(
        ?path,
        custom_breakpoints = config.breakpoints.is_some(),
        "loaded theme config"
    );
    Ok(config)
}
