use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::breakpoints::{breakpoint_order, Breakpoints, BASE};

/// Canonical form of a responsive value: at most one entry per breakpoint
/// name, with `base` as the unconditional fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakpointMap<T> {
    entries: IndexMap<String, T>,
}

impl<T> BreakpointMap<T> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Sets the value for `breakpoint`, replacing any previous one in place.
    pub fn insert(&mut self, breakpoint: impl Into<String>, value: T) -> Option<T> {
        self.entries.insert(breakpoint.into(), value)
    }

    pub fn with(mut self, breakpoint: impl Into<String>, value: T) -> Self {
        self.insert(breakpoint, value);
        self
    }

    pub fn get(&self, breakpoint: &str) -> Option<&T> {
        self.entries.get(breakpoint)
    }

    pub fn base(&self) -> Option<&T> {
        self.get(BASE)
    }

    pub fn contains(&self, breakpoint: &str) -> bool {
        self.entries.contains_key(breakpoint)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Entries in breakpoint order, followed by names the registry does not
    /// know about in insertion order.
    pub fn iter_ordered<'a>(
        &'a self,
        breakpoints: &Breakpoints,
    ) -> impl Iterator<Item = (&'a str, &'a T)> + 'a
    where
        T: 'a,
    {
        let order = breakpoint_order(breakpoints);
        let mut ranked: Vec<(usize, &'a str, &'a T)> = self
            .iter()
            .map(|(name, value)| {
                let rank = order
                    .iter()
                    .position(|entry| entry == name)
                    .unwrap_or(usize::MAX);
                (rank, name, value)
            })
            .collect();
        // Stable sort keeps insertion order among unranked names.
        ranked.sort_by_key(|(rank, _, _)| *rank);
        ranked.into_iter().map(|(_, name, value)| (name, value))
    }

    /// Value at `breakpoint`, falling back to the nearest smaller breakpoint
    /// that has one. Never looks at larger breakpoints.
    pub fn resolve(&self, breakpoint: &str, breakpoints: &Breakpoints) -> Option<&T> {
        if let Some(value) = self.get(breakpoint) {
            return Some(value);
        }

        let order = breakpoint_order(breakpoints);
        let position = order.iter().position(|entry| entry == breakpoint)?;
        order[..position]
            .iter()
            .rev()
            .find_map(|smaller| self.get(smaller))
    }
}

impl<T> Default for BreakpointMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, T> FromIterator<(K, T)> for BreakpointMap<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

/// A design attribute that may differ by viewport or container size.
///
/// The shape is fixed when the value is built (or deserialized: arrays become
/// [`ResponsiveValue::Ordered`], objects [`ResponsiveValue::Map`], anything
/// else [`ResponsiveValue::Scalar`]), so a plain object is never mistaken for
/// a breakpoint mapping further down the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsiveValue<T> {
    /// Mobile-first positional list: index 0 is `base`, index 1 the first
    /// standard tier and so on. `None` slots are skipped.
    Ordered(Vec<Option<T>>),
    Map(BreakpointMap<T>),
    Scalar(T),
}

impl<T> ResponsiveValue<T> {
    pub fn scalar(value: T) -> Self {
        Self::Scalar(value)
    }

    pub fn ordered<I: IntoIterator<Item = Option<T>>>(values: I) -> Self {
        Self::Ordered(values.into_iter().collect())
    }

    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        Self::Map(entries.into_iter().collect())
    }

    /// Consuming form of [`normalize_responsive_value`].
    pub fn into_normalized(self, breakpoints: &Breakpoints) -> BreakpointMap<T> {
        match self {
            Self::Map(map) => map,
            Self::Scalar(value) => BreakpointMap::new().with(BASE, value),
            Self::Ordered(values) => breakpoint_order(breakpoints)
                .into_iter()
                .zip(values)
                .filter_map(|(name, value)| value.map(|value| (name, value)))
                .collect(),
        }
    }
}

impl<T> From<BreakpointMap<T>> for ResponsiveValue<T> {
    fn from(map: BreakpointMap<T>) -> Self {
        Self::Map(map)
    }
}

impl<T> From<Vec<Option<T>>> for ResponsiveValue<T> {
    fn from(values: Vec<Option<T>>) -> Self {
        Self::Ordered(values)
    }
}

/// Canonical breakpoint map for `value`. Maps come back unchanged, so
/// normalizing twice is the same as normalizing once.
pub fn normalize_responsive_value<T: Clone>(
    value: &ResponsiveValue<T>,
    breakpoints: &Breakpoints,
) -> BreakpointMap<T> {
    value.clone().into_normalized(breakpoints)
}

/// Value of `value` at `breakpoint` with nearest-smaller fallback.
pub fn get_responsive_value<T: Clone>(
    value: &ResponsiveValue<T>,
    breakpoint: &str,
    breakpoints: &Breakpoints,
) -> Option<T> {
    match value {
        ResponsiveValue::Map(map) => map.resolve(breakpoint, breakpoints).cloned(),
        _ => normalize_responsive_value(value, breakpoints)
            .resolve(breakpoint, breakpoints)
            .cloned(),
    }
}
