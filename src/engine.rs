use std::path::Path;

use crate::breakpoints::Breakpoints;
use crate::config::{app_config_dir, config_env_dirs, load_engine_config_with, EngineConfig};
use crate::error::AppResult;
use crate::query::{
    generate_container_query, generate_media_query, ContainerQueryOptions, MediaQueryOptions,
};
use crate::styles::ResponsiveUtils;
use crate::theme::{load_theme_config_from, ThemeConfig, ThemeError, THEME_CONFIG_FILE};
use crate::tokens::{
    create_responsive_token_collection, ResponsiveTokenCollection, TokenCollection, TokenUtils,
};

/// A theme and engine settings resolved once and shared read-only by every
/// query and token operation.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    theme: ThemeConfig,
    breakpoints: Breakpoints,
}

impl Engine {
    pub fn new(config: EngineConfig, theme: ThemeConfig) -> Self {
        let breakpoints = theme.resolved_breakpoints();
        Self {
            config,
            theme,
            breakpoints,
        }
    }

    /// Engine from `config.json` and the theme it points at (or `theme.json`
    /// next to it).
    pub fn load() -> AppResult<Self> {
        let (xdg_config_home, home) = config_env_dirs();
        Self::load_with(xdg_config_home.as_deref(), home.as_deref())
    }

    pub(crate) fn load_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppResult<Self> {
        let config = load_engine_config_with(xdg_config_home, home);
        let config_dir = app_config_dir(xdg_config_home, home).map_err(ThemeError::from)?;
        let theme_path = config.theme_path(&config_dir, THEME_CONFIG_FILE);
        let theme = load_theme_config_from(&theme_path)?;
        tracing::info!(
            ?theme_path,
            breakpoints = theme.resolved_breakpoints().len(),
            "responsive engine loaded"
        );
        Ok(Self::new(config, theme))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// Media query for `breakpoint` using the configured query type.
    pub fn media_query(&self, breakpoint: &str) -> AppResult<String> {
        let options = MediaQueryOptions::with_kind(self.config.media_query_type);
        Ok(generate_media_query(breakpoint, &self.breakpoints, &options)?)
    }

    /// Shorthand container query using the configured query type.
    pub fn container_query(&self, size: &str, container: Option<&str>) -> String {
        let options = ContainerQueryOptions {
            container: container.map(str::to_string),
            kind: self.config.container_query_type,
        };
        generate_container_query(size, &options)
    }

    pub fn utils(&self) -> ResponsiveUtils {
        ResponsiveUtils::new(self.breakpoints.clone())
    }

    pub fn token_utils(&self) -> TokenUtils {
        TokenUtils::from_theme(&self.theme)
    }

    pub fn tokens(&self, collection: &TokenCollection) -> ResponsiveTokenCollection {
        create_responsive_token_collection(collection, &self.theme)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default(), ThemeConfig::default())
    }
}
