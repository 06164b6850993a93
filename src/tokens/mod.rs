use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::breakpoints::{Breakpoints, BASE};
use crate::query::QueryResult;
use crate::responsive::{BreakpointMap, ResponsiveValue};
use crate::styles::{map_breakpoint_values, StyleObject};

mod collection;

pub use collection::{
    color_token, create_responsive_token_collection, spacing_token, typography_token,
    ResponsiveTokenCollection, TokenCollection, TokenUtils,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenCategory {
    Color,
    Typography,
    Spacing,
    BorderRadius,
    Shadow,
    Breakpoint,
    ZIndex,
    Animation,
}

impl TokenCategory {
    /// Prefix of the token's CSS custom property, `--<prefix>-<id>`.
    pub const fn css_prefix(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Typography => "typography",
            Self::Spacing => "spacing",
            Self::BorderRadius => "radius",
            Self::Shadow => "shadow",
            Self::Breakpoint => "breakpoint",
            Self::ZIndex => "z-index",
            Self::Animation => "animation",
        }
    }

    /// Theme section holding the token, `<root>.<id>`.
    pub const fn path_root(self) -> &'static str {
        match self {
            Self::Color => "colors",
            Self::Typography => "typography",
            Self::Spacing => "spacing",
            Self::BorderRadius => "borderRadius",
            Self::Shadow => "shadows",
            Self::Breakpoint => "breakpoints",
            Self::ZIndex => "zIndex",
            Self::Animation => "animations",
        }
    }
}

/// Raw token payload: CSS text or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for TokenValue {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignToken<T> {
    pub id: String,
    pub name: String,
    pub category: TokenCategory,
    pub css_variable: String,
    pub path: String,
    pub value: T,
}

impl<T> DesignToken<T> {
    /// Token whose CSS variable and theme path derive from `category` and `id`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: TokenCategory,
        value: T,
    ) -> Self {
        let id = id.into();
        Self {
            css_variable: format!("--{}-{id}", category.css_prefix()),
            path: format!("{}.{id}", category.path_root()),
            name: name.into(),
            category,
            id,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveDesignToken<T> {
    pub id: String,
    pub name: String,
    pub category: TokenCategory,
    pub css_variable: String,
    pub path: String,
    pub value: BreakpointMap<T>,
    /// More than one entry, or no `base` entry.
    pub responsive: bool,
}

/// `base`'s identity with `value` normalized in place of its own value.
pub fn create_responsive_token<T: Clone>(
    base: &DesignToken<T>,
    value: &ResponsiveValue<T>,
    breakpoints: &Breakpoints,
) -> ResponsiveDesignToken<T> {
    let normalized = value.clone().into_normalized(breakpoints);
    let responsive = normalized.len() > 1 || !normalized.contains(BASE);

    ResponsiveDesignToken {
        id: base.id.clone(),
        name: base.name.clone(),
        category: base.category,
        css_variable: base.css_variable.clone(),
        path: base.path.clone(),
        value: normalized,
        responsive,
    }
}

/// `--var` for the base entry and `--var-<breakpoint>` for the rest.
/// Without a transformer values are rendered with `Display`.
pub fn generate_responsive_css_vars<T: fmt::Display>(
    token: &ResponsiveDesignToken<T>,
    breakpoints: &Breakpoints,
    transformer: Option<&dyn Fn(&T) -> String>,
) -> IndexMap<String, String> {
    let render = |value: &T| match transformer {
        Some(transformer) => transformer(value),
        None => value.to_string(),
    };

    let mut vars = IndexMap::new();
    if let Some(base) = token.value.base() {
        vars.insert(token.css_variable.clone(), render(base));
    }
    for (breakpoint, value) in token.value.iter_ordered(breakpoints) {
        if breakpoint != BASE {
            vars.insert(format!("{}-{breakpoint}", token.css_variable), render(value));
        }
    }
    vars
}

/// Map of tokens with each variant replacing its token's own value.
pub fn create_responsive_category<T: Clone>(
    tokens: &IndexMap<String, DesignToken<T>>,
    variants: &IndexMap<String, ResponsiveValue<T>>,
    breakpoints: &Breakpoints,
) -> IndexMap<String, ResponsiveDesignToken<T>> {
    tokens
        .iter()
        .map(|(key, token)| {
            let token = match variants.get(key) {
                Some(variant) => create_responsive_token(token, variant, breakpoints),
                None => create_responsive_token(
                    token,
                    &ResponsiveValue::Scalar(token.value.clone()),
                    breakpoints,
                ),
            };
            (key.clone(), token)
        })
        .collect()
}

pub fn resolve_token_at_breakpoint<T: Clone>(
    token: &ResponsiveDesignToken<T>,
    breakpoint: &str,
    breakpoints: &Breakpoints,
) -> Option<T> {
    token.value.resolve(breakpoint, breakpoints).cloned()
}

/// Style object for `property` driven by a token's breakpoint values.
pub fn apply_responsive_token<T>(
    token: &ResponsiveDesignToken<T>,
    property: &str,
    transformer: impl Fn(&T) -> String,
    breakpoints: &Breakpoints,
) -> QueryResult<StyleObject> {
    map_breakpoint_values(property, &token.value, transformer, breakpoints)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spacing(value: &str) -> DesignToken<TokenValue> {
        DesignToken::new("gutter", "Gutter", TokenCategory::Spacing, TokenValue::from(value))
    }

    #[test]
    fn design_token_identity_derives_from_category() {
        let token = spacing("8px");
        assert_eq!(token.css_variable, "--spacing-gutter");
        assert_eq!(token.path, "spacing.gutter");

        let radius = DesignToken::new("card", "Card", TokenCategory::BorderRadius, 4.0);
        assert_eq!(radius.css_variable, "--radius-card");
        assert_eq!(radius.path, "borderRadius.card");
    }

    #[test]
    fn scalar_token_is_not_responsive() {
        let base = spacing("8px");
        let token = create_responsive_token(
            &base,
            &ResponsiveValue::scalar(TokenValue::from("8px")),
            &Breakpoints::defaults(),
        );
        assert!(!token.responsive);
        assert_eq!(token.value.base(), Some(&TokenValue::from("8px")));
    }

    #[test]
    fn multi_entry_or_baseless_tokens_are_responsive() {
        let base = spacing("8px");
        let breakpoints = Breakpoints::defaults();

        let multi = create_responsive_token(
            &base,
            &ResponsiveValue::map([("base", TokenValue::from("8px")), ("md", TokenValue::from("16px"))]),
            &breakpoints,
        );
        assert!(multi.responsive);

        let baseless = create_responsive_token(
            &base,
            &ResponsiveValue::map([("md", TokenValue::from("16px"))]),
            &breakpoints,
        );
        assert!(baseless.responsive);
    }

    #[test]
    fn css_vars_suffix_breakpoint_names() {
        let base = spacing("8px");
        let token = create_responsive_token(
            &base,
            &ResponsiveValue::ordered([Some(TokenValue::from("8px")), None, Some(TokenValue::from("12px"))]),
            &Breakpoints::defaults(),
        );

        let vars = generate_responsive_css_vars(&token, &Breakpoints::defaults(), None);
        let collected: Vec<_> = vars.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            collected,
            vec![("--spacing-gutter", "8px"), ("--spacing-gutter-sm", "12px")]
        );
    }

    #[test]
    fn css_vars_use_transformer_when_given() {
        let base = DesignToken::new("body", "Body", TokenCategory::Typography, 14.0);
        let token = create_responsive_token(
            &base,
            &ResponsiveValue::map([("base", 14.0), ("lg", 18.0)]),
            &Breakpoints::defaults(),
        );
        let rem = |value: &f64| format!("{}rem", value / 16.0);

        let vars = generate_responsive_css_vars(&token, &Breakpoints::defaults(), Some(&rem));
        assert_eq!(vars["--typography-body"], "0.875rem");
        assert_eq!(vars["--typography-body-lg"], "1.125rem");
    }

    #[test]
    fn category_prefers_variants_over_token_values() {
        let mut tokens = IndexMap::new();
        tokens.insert("gutter".to_string(), spacing("8px"));
        tokens.insert(
            "inset".to_string(),
            DesignToken::new("inset", "Inset", TokenCategory::Spacing, TokenValue::from("4px")),
        );
        let mut variants = IndexMap::new();
        variants.insert(
            "gutter".to_string(),
            ResponsiveValue::ordered([Some(TokenValue::from("8px")), Some(TokenValue::from("10px"))]),
        );

        let category = create_responsive_category(&tokens, &variants, &Breakpoints::defaults());
        assert!(category["gutter"].responsive);
        assert_eq!(category["gutter"].value.get("xs"), Some(&TokenValue::from("10px")));
        assert!(!category["inset"].responsive);
        assert_eq!(category["inset"].value.base(), Some(&TokenValue::from("4px")));
    }

    #[test]
    fn token_resolution_and_styles() {
        let base = spacing("8px");
        let breakpoints = Breakpoints::defaults();
        let token = create_responsive_token(
            &base,
            &ResponsiveValue::map([("base", TokenValue::from("8px")), ("lg", TokenValue::from("24px"))]),
            &breakpoints,
        );

        assert_eq!(
            resolve_token_at_breakpoint(&token, "md", &breakpoints),
            Some(TokenValue::from("8px"))
        );
        assert_eq!(
            resolve_token_at_breakpoint(&token, "2xl", &breakpoints),
            Some(TokenValue::from("24px"))
        );

        let css = apply_responsive_token(&token, "padding", ToString::to_string, &breakpoints)
            .unwrap()
            .to_css();
        assert_eq!(css, "padding: 8px; @media (min-width: 1024px) { padding: 24px; }");
    }

    #[test]
    fn numbers_render_without_trailing_zeroes() {
        assert_eq!(TokenValue::Number(100.0).to_string(), "100");
        assert_eq!(TokenValue::Number(1.5).to_string(), "1.5");
    }
}
