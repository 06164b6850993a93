use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::breakpoints::{Breakpoints, BASE};
use crate::query::{
    create_container_definition, generate_media_query, ContainerDefinition, MediaQueryOptions,
    QueryResult,
};
use crate::responsive::{normalize_responsive_value, BreakpointMap, ResponsiveValue};

mod utils;

pub use utils::ResponsiveUtils;

/// Prefix that marks a key of a container-keyed value as a query.
pub const CONTAINER_QUERY_PREFIX: &str = "@container";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// Unconditional `property: value`.
    Declaration(String),
    /// Declarations nested under a query key.
    Block(IndexMap<String, String>),
}

/// Insertion-ordered style object. Keys are property names for declarations
/// and query strings for blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleObject {
    entries: IndexMap<String, StyleValue>,
}

impl StyleObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `property` unconditionally. An existing entry is replaced in place.
    pub fn declare(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(property.into(), StyleValue::Declaration(value.into()));
    }

    /// Adds `property: value` inside the block for `query`, creating it if
    /// needed. A declaration already stored under `query` is replaced.
    pub fn nest(
        &mut self,
        query: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<String>,
    ) {
        let entry = self
            .entries
            .entry(query.into())
            .or_insert_with(|| StyleValue::Block(IndexMap::new()));
        if let StyleValue::Declaration(_) = entry {
            *entry = StyleValue::Block(IndexMap::new());
        }
        if let StyleValue::Block(block) = entry {
            block.insert(property.into(), value.into());
        }
    }

    /// Copies every entry of `other` over `self`, replacing equal keys in
    /// place and appending new ones.
    pub fn assign(&mut self, other: StyleObject) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flat CSS text: `prop: v;` for declarations, `query { prop: v; }` for
    /// blocks, separated by single spaces.
    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(key, value)| match value {
                StyleValue::Declaration(value) => format!("{key}: {value};"),
                StyleValue::Block(block) => format!("{key} {{ {} }}", declarations(block)),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn declarations(block: &IndexMap<String, String>) -> String {
    block
        .iter()
        .map(|(property, value)| format!("{property}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Base declaration plus one `@media` block per non-base breakpoint, in
/// breakpoint order.
pub fn map_responsive_values<T: Clone>(
    property: &str,
    value: &ResponsiveValue<T>,
    transformer: impl Fn(&T) -> String,
    breakpoints: &Breakpoints,
) -> QueryResult<StyleObject> {
    let normalized = normalize_responsive_value(value, breakpoints);
    map_breakpoint_values(property, &normalized, transformer, breakpoints)
}

pub(crate) fn map_breakpoint_values<T>(
    property: &str,
    values: &BreakpointMap<T>,
    transformer: impl Fn(&T) -> String,
    breakpoints: &Breakpoints,
) -> QueryResult<StyleObject> {
    let mut styles = StyleObject::new();

    if let Some(base) = values.base() {
        styles.declare(property, transformer(base));
    }

    for (breakpoint, breakpoint_value) in values.iter_ordered(breakpoints) {
        if breakpoint == BASE {
            continue;
        }
        let query = generate_media_query(breakpoint, breakpoints, &MediaQueryOptions::default())?;
        styles.nest(query, property, transformer(breakpoint_value));
    }

    tracing::debug!(property, entries = styles.len(), "mapped responsive values");
    Ok(styles)
}

/// [`map_responsive_values`] rendered as flat CSS text.
pub fn create_responsive_styles<T: Clone>(
    property: &str,
    value: &ResponsiveValue<T>,
    transformer: impl Fn(&T) -> String,
    breakpoints: &Breakpoints,
) -> QueryResult<String> {
    map_responsive_values(property, value, transformer, breakpoints).map(|styles| styles.to_css())
}

/// A value that is either unconditional or keyed by `@container` queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContainerValue<T> {
    Queries(IndexMap<String, T>),
    Scalar(T),
}

impl<T> ContainerValue<T> {
    pub fn queries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        Self::Queries(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }
}

/// Style object for a container-keyed value.
///
/// Keys starting with `@container` become blocks. Every other key (`base` by
/// convention) sets the unconditional declaration, so with several such keys
/// the last one in iteration order wins.
pub fn apply_container_query<T>(
    property: &str,
    value: &ContainerValue<T>,
    transformer: impl Fn(&T) -> String,
) -> StyleObject {
    let mut styles = StyleObject::new();
    match value {
        ContainerValue::Scalar(value) => styles.declare(property, transformer(value)),
        ContainerValue::Queries(queries) => {
            for (query, query_value) in queries {
                if query.starts_with(CONTAINER_QUERY_PREFIX) {
                    styles.nest(query.as_str(), property, transformer(query_value));
                } else {
                    styles.declare(property, transformer(query_value));
                }
            }
        }
    }
    styles
}

/// Stylesheet for a component that is itself a query container: the
/// container definition, then one rule per declaration and per query block.
pub fn create_container_styles(
    component: &str,
    container: &ContainerDefinition,
    styles: &IndexMap<String, ContainerValue<String>>,
) -> String {
    let selector = format!(".{component}");
    let mut css = vec![create_container_definition(&selector, container)];

    for (property, value) in styles {
        for (key, style) in apply_container_query(property, value, String::clone).iter() {
            match style {
                StyleValue::Declaration(value) => {
                    css.push(format!("{selector} {{ {key}: {value}; }}"));
                }
                StyleValue::Block(block) => {
                    let body = block
                        .iter()
                        .map(|(property, value)| format!("{property}: {value}"))
                        .collect::<Vec<_>>()
                        .join("; ");
                    css.push(format!("{key} {{ {selector} {{ {body}; }} }}"));
                }
            }
        }
    }

    css.join("\n")
}

/// Media-query values first, then container-query values assigned over them.
pub fn create_hybrid_responsive_styles<T: Clone>(
    property: &str,
    media_values: &ResponsiveValue<T>,
    container_values: &ContainerValue<T>,
    breakpoints: &Breakpoints,
    transformer: impl Fn(&T) -> String,
) -> StyleObject {
    let mut styles = StyleObject::new();

    for (breakpoint, value) in normalize_responsive_value(media_values, breakpoints).iter() {
        if breakpoint == BASE {
            styles.declare(property, transformer(value));
        } else {
            let threshold = breakpoints.get(breakpoint).unwrap_or_default();
            styles.nest(
                format!("@media (min-width: {threshold})"),
                property,
                transformer(value),
            );
        }
    }

    styles.assign(apply_container_query(property, container_values, &transformer));
    styles
}
