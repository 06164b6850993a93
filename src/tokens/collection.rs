use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{
    apply_responsive_token, create_responsive_category, create_responsive_token,
    generate_responsive_css_vars, resolve_token_at_breakpoint, DesignToken, ResponsiveDesignToken,
    TokenCategory, TokenValue,
};
use crate::breakpoints::{extract_breakpoints, Breakpoints};
use crate::query::QueryResult;
use crate::responsive::ResponsiveValue;
use crate::styles::StyleObject;
use crate::theme::{ThemeConfig, TokenOverrides};

type Tokens = IndexMap<String, DesignToken<TokenValue>>;
type ResponsiveTokens = IndexMap<String, ResponsiveDesignToken<TokenValue>>;

/// Static design tokens grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCollection {
    #[serde(default)]
    pub colors: Tokens,
    #[serde(default)]
    pub typography: Tokens,
    #[serde(default)]
    pub spacing: Tokens,
    #[serde(default)]
    pub border_radius: Tokens,
    #[serde(default)]
    pub shadows: Tokens,
    #[serde(default)]
    pub breakpoints: Tokens,
    #[serde(default)]
    pub z_index: Tokens,
    #[serde(default)]
    pub animations: Tokens,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveTokenCollection {
    pub colors: ResponsiveTokens,
    pub typography: ResponsiveTokens,
    pub spacing: ResponsiveTokens,
    pub border_radius: ResponsiveTokens,
    pub shadows: ResponsiveTokens,
    pub breakpoints: ResponsiveTokens,
    pub z_index: ResponsiveTokens,
    pub animations: ResponsiveTokens,
}

impl ResponsiveTokenCollection {
    pub fn iter(&self) -> impl Iterator<Item = &ResponsiveDesignToken<TokenValue>> {
        [
            &self.colors,
            &self.typography,
            &self.spacing,
            &self.border_radius,
            &self.shadows,
            &self.breakpoints,
            &self.z_index,
            &self.animations,
        ]
        .into_iter()
        .flat_map(IndexMap::values)
    }
}

/// Applies the theme's per-category overrides to `collection`, normalizing
/// every token against the theme's breakpoints.
pub fn create_responsive_token_collection(
    collection: &TokenCollection,
    theme: &ThemeConfig,
) -> ResponsiveTokenCollection {
    let breakpoints = extract_breakpoints(Some(theme));
    let category = |tokens: &Tokens, variants: &TokenOverrides| {
        create_responsive_category(tokens, variants, &breakpoints)
    };

    // Breakpoint tokens take the theme's raw thresholds as overrides.
    let breakpoint_variants: TokenOverrides = theme
        .breakpoints
        .iter()
        .flat_map(Breakpoints::iter)
        .map(|(name, value)| (name.to_string(), ResponsiveValue::scalar(TokenValue::from(value))))
        .collect();

    let responsive = ResponsiveTokenCollection {
        colors: category(&collection.colors, &theme.colors),
        typography: category(&collection.typography, &theme.typography),
        spacing: category(&collection.spacing, &theme.spacing),
        border_radius: category(&collection.border_radius, &theme.border_radius),
        shadows: category(&collection.shadows, &theme.shadows),
        breakpoints: category(&collection.breakpoints, &breakpoint_variants),
        z_index: category(&collection.z_index, &theme.z_indices),
        animations: category(&collection.animations, &theme.animations),
    };
    tracing::debug!(
        tokens = responsive.iter().count(),
        responsive = responsive.iter().filter(|token| token.responsive).count(),
        "built responsive token collection"
    );
    responsive
}

/// Token helpers bound to a theme's breakpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenUtils {
    breakpoints: Breakpoints,
}

impl TokenUtils {
    pub fn from_theme(theme: &ThemeConfig) -> Self {
        Self {
            breakpoints: extract_breakpoints(Some(theme)),
        }
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn value<T: Clone>(&self, token: &ResponsiveDesignToken<T>, breakpoint: &str) -> Option<T> {
        resolve_token_at_breakpoint(token, breakpoint, &self.breakpoints)
    }

    /// Style object for `property`, rendering values with `Display`.
    pub fn apply<T: std::fmt::Display>(
        &self,
        token: &ResponsiveDesignToken<T>,
        property: &str,
    ) -> QueryResult<StyleObject> {
        apply_responsive_token(token, property, ToString::to_string, &self.breakpoints)
    }

    pub fn apply_with<T>(
        &self,
        token: &ResponsiveDesignToken<T>,
        property: &str,
        transformer: impl Fn(&T) -> String,
    ) -> QueryResult<StyleObject> {
        apply_responsive_token(token, property, transformer, &self.breakpoints)
    }

    pub fn to_css_vars<T: std::fmt::Display>(
        &self,
        token: &ResponsiveDesignToken<T>,
        transformer: Option<&dyn Fn(&T) -> String>,
    ) -> IndexMap<String, String> {
        generate_responsive_css_vars(token, &self.breakpoints, transformer)
    }

    pub fn is_responsive<T>(&self, token: &ResponsiveDesignToken<T>) -> bool {
        token.responsive
    }
}

fn themed_token(
    category: TokenCategory,
    id: &str,
    name: &str,
    value: &ResponsiveValue<TokenValue>,
    theme: &ThemeConfig,
) -> ResponsiveDesignToken<TokenValue> {
    let seed = match value {
        ResponsiveValue::Scalar(value) => value.clone(),
        _ => TokenValue::Text(String::new()),
    };
    let base = DesignToken::new(id, name, category, seed);
    create_responsive_token(&base, value, &extract_breakpoints(Some(theme)))
}

/// Responsive `--color-<id>` token at `colors.<id>`.
pub fn color_token(
    id: &str,
    name: &str,
    value: &ResponsiveValue<TokenValue>,
    theme: &ThemeConfig,
) -> ResponsiveDesignToken<TokenValue> {
    themed_token(TokenCategory::Color, id, name, value, theme)
}

/// Responsive `--spacing-<id>` token at `spacing.<id>`.
pub fn spacing_token(
    id: &str,
    name: &str,
    value: &ResponsiveValue<TokenValue>,
    theme: &ThemeConfig,
) -> ResponsiveDesignToken<TokenValue> {
    themed_token(TokenCategory::Spacing, id, name, value, theme)
}

/// Responsive `--typography-<id>` token at `typography.<id>`.
pub fn typography_token(
    id: &str,
    name: &str,
    value: &ResponsiveValue<TokenValue>,
    theme: &ThemeConfig,
) -> ResponsiveDesignToken<TokenValue> {
    themed_token(TokenCategory::Typography, id, name, value, theme)
}
