use crate::breakpoints::{extract_breakpoints, Breakpoints};
use crate::query::{
    generate_container_query, generate_media_query, ContainerQueryOptions, MediaQueryOptions,
    MediaQueryType, QueryResult,
};
use crate::responsive::{get_responsive_value, ResponsiveValue};
use crate::theme::ThemeConfig;

use super::{map_responsive_values, StyleObject};

/// Query and value helpers bound to one breakpoint registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsiveUtils {
    breakpoints: Breakpoints,
}

impl ResponsiveUtils {
    pub fn new(breakpoints: Breakpoints) -> Self {
        Self { breakpoints }
    }

    pub fn from_theme(theme: Option<&ThemeConfig>) -> Self {
        Self::new(extract_breakpoints(theme))
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// `@media (min-width: <bp>)`.
    pub fn up(&self, breakpoint: &str) -> QueryResult<String> {
        generate_media_query(breakpoint, &self.breakpoints, &MediaQueryOptions::default())
    }

    /// `@media (max-width: <bp>)`.
    pub fn down(&self, breakpoint: &str) -> QueryResult<String> {
        generate_media_query(
            breakpoint,
            &self.breakpoints,
            &MediaQueryOptions::with_kind(MediaQueryType::MaxWidth),
        )
    }

    /// `up(min)` and `down(max)` joined with `and`.
    ///
    /// Both halves keep their `@media` prefix, so the result is a pair of
    /// queries rather than a single nested one.
    pub fn between(&self, min: &str, max: &str) -> QueryResult<String> {
        Ok(format!("{} and {}", self.up(min)?, self.down(max)?))
    }

    pub fn container(&self, size: &str, options: &ContainerQueryOptions) -> String {
        generate_container_query(size, options)
    }

    pub fn value<T: Clone>(&self, value: &ResponsiveValue<T>, breakpoint: &str) -> Option<T> {
        get_responsive_value(value, breakpoint, &self.breakpoints)
    }

    pub fn map_values<T: Clone>(
        &self,
        property: &str,
        value: &ResponsiveValue<T>,
        transformer: impl Fn(&T) -> String,
    ) -> QueryResult<StyleObject> {
        map_responsive_values(property, value, transformer, &self.breakpoints)
    }
}

impl Default for ResponsiveUtils {
    fn default() -> Self {
        Self::new(Breakpoints::defaults())
    }
}
