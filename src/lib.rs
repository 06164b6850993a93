pub mod breakpoints;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod query;
pub mod responsive;
pub mod styles;
pub mod theme;
pub mod tokens;

pub use breakpoints::{breakpoint_order, extract_breakpoints, Breakpoints};
pub use engine::Engine;
pub use error::{AppError, AppResult};
pub use query::{generate_container_query, generate_media_query, QueryError, QueryResult};
pub use responsive::{
    get_responsive_value, normalize_responsive_value, BreakpointMap, ResponsiveValue,
};
pub use styles::{
    apply_container_query, create_responsive_styles, map_responsive_values, ContainerValue,
    StyleObject, StyleValue,
};
pub use theme::{load_theme_config, ThemeConfig};

/// Entrypoint for integrations: installs logging, then loads the engine from
/// the user config directory.
pub fn load() -> AppResult<Engine> {
    logging::init();
    tracing::info!("loading responsive token engine");
    Engine::load()
}

#[cfg(test)]
mod tests {
    use super::load;

    #[test]
    fn load_installs_a_global_subscriber() {
        let _ = load();
        assert!(tracing::dispatcher::has_been_set());
    }
}
