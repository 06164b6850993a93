use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::theme::ThemeConfig;

/// Name of the unconditional tier. It never carries a threshold.
pub const BASE: &str = "base";

/// Standard tiers, smallest first. Registry names outside this list are
/// appended after all of them by [`breakpoint_order`].
pub const STANDARD_ORDER: [&str; 7] = ["base", "xs", "sm", "md", "lg", "xl", "2xl"];

const DEFAULT_THRESHOLDS: [(&str, &str); 6] = [
    ("xs", "480px"),
    ("sm", "640px"),
    ("md", "768px"),
    ("lg", "1024px"),
    ("xl", "1280px"),
    ("2xl", "1536px"),
];

/// Ordered `name -> CSS length` registry.
///
/// Built once per theme and never mutated afterwards; switching themes means
/// building a new registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakpoints {
    entries: IndexMap<String, String>,
}

impl Breakpoints {
    /// `xs=480px sm=640px md=768px lg=1024px xl=1280px 2xl=1536px`.
    pub fn defaults() -> Self {
        DEFAULT_THRESHOLDS
            .iter()
            .map(|(name, value)| (*name, *value))
            .collect()
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Threshold for `name`. Empty thresholds are treated as missing.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::defaults()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Breakpoints {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

/// Registry for a theme: the theme's own breakpoints when it declares any,
/// otherwise the defaults. Theme breakpoints replace the defaults wholesale.
pub fn extract_breakpoints(theme: Option<&ThemeConfig>) -> Breakpoints {
    match theme.and_then(|theme| theme.breakpoints.as_ref()) {
        Some(breakpoints) if !breakpoints.is_empty() => breakpoints.clone(),
        _ => Breakpoints::defaults(),
    }
}

/// `base` and the standard tiers first, then custom names in registry order.
///
/// Custom names always sort after `2xl`, whatever their threshold.
pub fn breakpoint_order(breakpoints: &Breakpoints) -> Vec<String> {
    let mut order: Vec<String> = STANDARD_ORDER.iter().map(|name| name.to_string()).collect();
    order.extend(
        breakpoints
            .names()
            .filter(|name| !STANDARD_ORDER.contains(name))
            .map(str::to_string),
    );
    order
}
