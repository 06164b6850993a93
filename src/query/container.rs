use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::error::{QueryError, QueryResult};
use super::media::Orientation;
use crate::breakpoints::Breakpoints;

/// Axis compared by a shorthand `@container (<type> >= <size>)` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerQueryType {
    #[default]
    InlineSize,
    BlockSize,
    Style,
}

impl ContainerQueryType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InlineSize => "inline-size",
            Self::BlockSize => "block-size",
            Self::Style => "style",
        }
    }
}

impl fmt::Display for ContainerQueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of the `container-type` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerType {
    Size,
    InlineSize,
    BlockSize,
    Style,
}

impl ContainerType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::InlineSize => "inline-size",
            Self::BlockSize => "block-size",
            Self::Style => "style",
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContainerQueryOptions {
    #[serde(default)]
    pub container: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: ContainerQueryType,
}

impl ContainerQueryOptions {
    pub fn named(container: impl Into<String>) -> Self {
        Self {
            container: Some(container.into()),
            ..Self::default()
        }
    }
}

/// `@container [name ](<type> >= <size>)`.
pub fn generate_container_query(size: &str, options: &ContainerQueryOptions) -> String {
    format!(
        "@container {}({} >= {size})",
        container_prefix(options.container.as_deref()),
        options.kind
    )
}

/// One shorthand container query per registry entry with a threshold.
pub fn create_container_queries(
    breakpoints: &Breakpoints,
    options: &ContainerQueryOptions,
) -> IndexMap<String, String> {
    breakpoints
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| (name.to_string(), generate_container_query(value, options)))
        .collect()
}

/// Conjunction of container constraints. Empty strings count as unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerQueryCondition {
    #[serde(default)]
    pub min_width: Option<String>,
    #[serde(default)]
    pub max_width: Option<String>,
    #[serde(default)]
    pub min_height: Option<String>,
    #[serde(default)]
    pub max_height: Option<String>,
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    #[serde(default)]
    pub orientation: Option<Orientation>,
}

impl ContainerQueryCondition {
    fn terms(&self) -> Vec<String> {
        let sized = [
            ("min-width", &self.min_width),
            ("max-width", &self.max_width),
            ("min-height", &self.min_height),
            ("max-height", &self.max_height),
            ("width", &self.width),
            ("height", &self.height),
            ("aspect-ratio", &self.aspect_ratio),
        ];

        let mut terms: Vec<String> = sized
            .into_iter()
            .filter_map(|(feature, value)| {
                value
                    .as_deref()
                    .filter(|value| !value.is_empty())
                    .map(|value| format!("({feature}: {value})"))
            })
            .collect();
        if let Some(orientation) = self.orientation {
            terms.push(format!("(orientation: {orientation})"));
        }
        terms
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContainerQueryBuilderOptions {
    #[serde(default)]
    pub container: Option<String>,
}

impl ContainerQueryBuilderOptions {
    pub fn named(container: impl Into<String>) -> Self {
        Self {
            container: Some(container.into()),
        }
    }
}

/// Full `@container` query from a condition set.
pub fn generate_container_query_string(
    conditions: &ContainerQueryCondition,
    options: &ContainerQueryBuilderOptions,
) -> QueryResult<String> {
    let terms = conditions.terms();
    if terms.is_empty() {
        tracing::warn!(container = ?options.container, "container query requested without conditions");
        return Err(QueryError::EmptyContainerCondition);
    }

    Ok(format!(
        "@container {}{}",
        container_prefix(options.container.as_deref()),
        terms.join(" and ")
    ))
}

fn container_prefix(container: Option<&str>) -> String {
    container
        .filter(|name| !name.is_empty())
        .map(|name| format!("{name} "))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContainerName {
    One(String),
    Many(Vec<String>),
}

impl ContainerName {
    fn joined(&self) -> String {
        match self {
            Self::One(name) => name.clone(),
            Self::Many(names) => names.join(" "),
        }
    }
}

impl From<&str> for ContainerName {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContainerDefinition {
    #[serde(default)]
    pub name: Option<ContainerName>,
    #[serde(default, rename = "type")]
    pub kind: Option<ContainerType>,
    /// Extra declarations emitted after the container properties.
    #[serde(default)]
    pub style: IndexMap<String, String>,
}

impl ContainerDefinition {
    pub fn new(name: impl Into<ContainerName>, kind: ContainerType) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(kind),
            style: IndexMap::new(),
        }
    }
}

/// `<selector> { container-name: ..; container-type: ..; <style>; }`
pub fn create_container_definition(selector: &str, definition: &ContainerDefinition) -> String {
    let mut properties = Vec::new();
    if let Some(name) = &definition.name {
        properties.push(format!("container-name: {}", name.joined()));
    }
    if let Some(kind) = definition.kind {
        properties.push(format!("container-type: {kind}"));
    }
    properties.extend(
        definition
            .style
            .iter()
            .map(|(property, value)| format!("{property}: {value}")),
    );

    format!("{selector} {{ {}; }}", properties.join("; "))
}

/// Preset container widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerSize {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xl2,
    Xl3,
    Xl4,
    Xl5,
    Xl6,
}

impl ContainerSize {
    pub const ALL: [ContainerSize; 10] = [
        Self::Xs,
        Self::Sm,
        Self::Md,
        Self::Lg,
        Self::Xl,
        Self::Xl2,
        Self::Xl3,
        Self::Xl4,
        Self::Xl5,
        Self::Xl6,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xl2 => "2xl",
            Self::Xl3 => "3xl",
            Self::Xl4 => "4xl",
            Self::Xl5 => "5xl",
            Self::Xl6 => "6xl",
        }
    }

    pub const fn width(self) -> &'static str {
        match self {
            Self::Xs => "320px",
            Self::Sm => "384px",
            Self::Md => "448px",
            Self::Lg => "512px",
            Self::Xl => "576px",
            Self::Xl2 => "672px",
            Self::Xl3 => "768px",
            Self::Xl4 => "896px",
            Self::Xl5 => "1024px",
            Self::Xl6 => "1152px",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.name() == name)
    }
}

/// `min-width` container query for a preset name, or for `size` taken
/// literally when it is not a preset.
pub fn container_query_from_size(
    size: &str,
    options: &ContainerQueryBuilderOptions,
) -> QueryResult<String> {
    let width = ContainerSize::from_name(size).map_or(size, |preset| preset.width());
    generate_container_query_string(
        &ContainerQueryCondition {
            min_width: Some(width.to_string()),
            ..ContainerQueryCondition::default()
        },
        options,
    )
}

/// Shorthand builders for common container queries, optionally scoped to a
/// named container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerQueryBuilder {
    options: ContainerQueryBuilderOptions,
}

impl ContainerQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(container: impl Into<String>) -> Self {
        Self {
            options: ContainerQueryBuilderOptions::named(container),
        }
    }

    fn build(&self, conditions: ContainerQueryCondition) -> QueryResult<String> {
        generate_container_query_string(&conditions, &self.options)
    }

    pub fn min_width(&self, width: &str) -> QueryResult<String> {
        self.build(ContainerQueryCondition {
            min_width: Some(width.to_string()),
            ..ContainerQueryCondition::default()
        })
    }

    pub fn max_width(&self, width: &str) -> QueryResult<String> {
        self.build(ContainerQueryCondition {
            max_width: Some(width.to_string()),
            ..ContainerQueryCondition::default()
        })
    }

    pub fn between(&self, min_width: &str, max_width: &str) -> QueryResult<String> {
        self.build(ContainerQueryCondition {
            min_width: Some(min_width.to_string()),
            max_width: Some(max_width.to_string()),
            ..ContainerQueryCondition::default()
        })
    }

    pub fn width(&self, width: &str) -> QueryResult<String> {
        self.build(ContainerQueryCondition {
            width: Some(width.to_string()),
            ..ContainerQueryCondition::default()
        })
    }

    pub fn min_height(&self, height: &str) -> QueryResult<String> {
        self.build(ContainerQueryCondition {
            min_height: Some(height.to_string()),
            ..ContainerQueryCondition::default()
        })
    }

    pub fn aspect_ratio(&self, ratio: &str) -> QueryResult<String> {
        self.build(ContainerQueryCondition {
            aspect_ratio: Some(ratio.to_string()),
            ..ContainerQueryCondition::default()
        })
    }

    pub fn orientation(&self, orientation: Orientation) -> QueryResult<String> {
        self.build(ContainerQueryCondition {
            orientation: Some(orientation),
            ..ContainerQueryCondition::default()
        })
    }

    pub fn size(&self, size: ContainerSize) -> QueryResult<String> {
        container_query_from_size(size.name(), &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_query_defaults_to_inline_size() {
        let query = generate_container_query("500px", &ContainerQueryOptions::default());
        assert_eq!(query, "@container (inline-size >= 500px)");
    }

    #[test]
    fn shorthand_query_with_name_and_type() {
        assert_eq!(
            generate_container_query("500px", &ContainerQueryOptions::named("card")),
            "@container card (inline-size >= 500px)"
        );
        let options = ContainerQueryOptions {
            kind: ContainerQueryType::BlockSize,
            ..ContainerQueryOptions::default()
        };
        assert_eq!(
            generate_container_query("500px", &options),
            "@container (block-size >= 500px)"
        );
    }

    #[test]
    fn container_queries_cover_every_breakpoint() {
        let queries =
            create_container_queries(&Breakpoints::defaults(), &ContainerQueryOptions::default());
        assert_eq!(queries.len(), 6);
        assert_eq!(queries["xs"], "@container (inline-size >= 480px)");
        assert_eq!(queries["2xl"], "@container (inline-size >= 1536px)");
    }

    #[test]
    fn condition_terms_follow_fixed_order() {
        let conditions = ContainerQueryCondition {
            orientation: Some(Orientation::Landscape),
            max_width: Some("800px".into()),
            min_width: Some("400px".into()),
            ..ContainerQueryCondition::default()
        };
        let query =
            generate_container_query_string(&conditions, &ContainerQueryBuilderOptions::default())
                .unwrap();
        assert_eq!(
            query,
            "@container (min-width: 400px) and (max-width: 800px) and (orientation: landscape)"
        );
    }

    #[test]
    fn condition_query_with_container_name() {
        let conditions = ContainerQueryCondition {
            min_width: Some("500px".into()),
            ..ContainerQueryCondition::default()
        };
        let query =
            generate_container_query_string(&conditions, &ContainerQueryBuilderOptions::named("card"))
                .unwrap();
        assert_eq!(query, "@container card (min-width: 500px)");
    }

    #[test]
    fn empty_conditions_are_rejected() {
        let err = generate_container_query_string(
            &ContainerQueryCondition::default(),
            &ContainerQueryBuilderOptions::default(),
        )
        .expect_err("empty condition should fail");
        assert_eq!(err, QueryError::EmptyContainerCondition);
        assert_eq!(err.to_string(), "Container query must have at least one condition");
    }

    #[test]
    fn blank_condition_values_do_not_count() {
        let conditions = ContainerQueryCondition {
            width: Some(String::new()),
            ..ContainerQueryCondition::default()
        };
        assert!(
            generate_container_query_string(&conditions, &ContainerQueryBuilderOptions::default())
                .is_err()
        );
    }

    #[test]
    fn conditions_deserialize_from_camel_case() {
        let conditions: ContainerQueryCondition =
            serde_json::from_str(r#"{"aspectRatio": "16/9", "minHeight": "200px"}"#).unwrap();
        let query =
            generate_container_query_string(&conditions, &ContainerQueryBuilderOptions::default())
                .unwrap();
        assert_eq!(query, "@container (min-height: 200px) and (aspect-ratio: 16/9)");
    }

    #[test]
    fn definition_with_name_and_type() {
        let definition = ContainerDefinition::new("card", ContainerType::InlineSize);
        assert_eq!(
            create_container_definition(".card", &definition),
            ".card { container-name: card; container-type: inline-size; }"
        );
    }

    #[test]
    fn definition_joins_multiple_names() {
        let definition = ContainerDefinition {
            name: Some(ContainerName::Many(vec!["card".into(), "wrapper".into()])),
            kind: Some(ContainerType::Size),
            ..ContainerDefinition::default()
        };
        assert_eq!(
            create_container_definition(".component", &definition),
            ".component { container-name: card wrapper; container-type: size; }"
        );
    }

    #[test]
    fn definition_appends_custom_styles() {
        let mut definition = ContainerDefinition::new("card", ContainerType::InlineSize);
        definition.style.insert("position".into(), "relative".into());
        definition.style.insert("overflow".into(), "hidden".into());
        assert_eq!(
            create_container_definition(".card", &definition),
            ".card { container-name: card; container-type: inline-size; position: relative; overflow: hidden; }"
        );
    }

    #[test]
    fn query_from_preset_or_literal_size() {
        let options = ContainerQueryBuilderOptions::default();
        assert_eq!(
            container_query_from_size("md", &options).unwrap(),
            "@container (min-width: 448px)"
        );
        assert_eq!(
            container_query_from_size("600px", &options).unwrap(),
            "@container (min-width: 600px)"
        );
        assert_eq!(
            container_query_from_size("md", &ContainerQueryBuilderOptions::named("card")).unwrap(),
            "@container card (min-width: 448px)"
        );
    }

    #[test]
    fn query_from_owned_literal_size() {
        let size = String::from("600px");
        assert_eq!(
            container_query_from_size(&size, &ContainerQueryBuilderOptions::default()).unwrap(),
            "@container (min-width: 600px)"
        );
    }

    #[test]
    fn builder_shorthands() {
        let builder = ContainerQueryBuilder::new();
        assert_eq!(builder.min_width("500px").unwrap(), "@container (min-width: 500px)");
        assert_eq!(builder.max_width("800px").unwrap(), "@container (max-width: 800px)");
        assert_eq!(
            builder.between("400px", "800px").unwrap(),
            "@container (min-width: 400px) and (max-width: 800px)"
        );
        assert_eq!(builder.width("600px").unwrap(), "@container (width: 600px)");
        assert_eq!(builder.min_height("300px").unwrap(), "@container (min-height: 300px)");
        assert_eq!(builder.aspect_ratio("16/9").unwrap(), "@container (aspect-ratio: 16/9)");
        assert_eq!(
            builder.orientation(Orientation::Portrait).unwrap(),
            "@container (orientation: portrait)"
        );
        assert_eq!(
            builder.size(ContainerSize::Lg).unwrap(),
            "@container (min-width: 512px)"
        );
    }

    #[test]
    fn named_builder_scopes_queries() {
        let builder = ContainerQueryBuilder::named("card");
        assert_eq!(
            builder.min_width("500px").unwrap(),
            "@container card (min-width: 500px)"
        );
    }

    #[test]
    fn preset_lookup_by_name() {
        assert_eq!(ContainerSize::from_name("md").map(ContainerSize::width), Some("448px"));
        assert_eq!(ContainerSize::from_name("6xl").map(ContainerSize::width), Some("1152px"));
        assert_eq!(ContainerSize::from_name("7xl"), None);
    }
}
