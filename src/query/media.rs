use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::error::{QueryError, QueryResult};
use crate::breakpoints::{Breakpoints, BASE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MediaQueryType {
    #[default]
    MinWidth,
    MaxWidth,
    Screen,
    Print,
}

impl MediaQueryType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MinWidth => "min-width",
            Self::MaxWidth => "max-width",
            Self::Screen => "screen",
            Self::Print => "print",
        }
    }
}

impl fmt::Display for MediaQueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User preference media feature, rendered as `(prefers-<name>)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaPreference {
    Light,
    Dark,
    ReducedMotion,
    Contrast,
}

impl MediaPreference {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::ReducedMotion => "reduced-motion",
            Self::Contrast => "contrast",
        }
    }
}

impl fmt::Display for MediaPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaQueryOptions {
    #[serde(default, rename = "type")]
    pub kind: MediaQueryType,
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub prefers: Option<MediaPreference>,
}

impl MediaQueryOptions {
    pub fn with_kind(kind: MediaQueryType) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

/// `@media` query for `breakpoint`, or `""` for `base`.
///
/// Terms are joined with `and` in a fixed order: size, orientation,
/// preference.
pub fn generate_media_query(
    breakpoint: &str,
    breakpoints: &Breakpoints,
    options: &MediaQueryOptions,
) -> QueryResult<String> {
    if breakpoint == BASE {
        return Ok(String::new());
    }

    let Some(value) = breakpoints.get(breakpoint) else {
        tracing::warn!(breakpoint, "media query requested for unknown breakpoint");
        return Err(QueryError::BreakpointNotFound {
            breakpoint: breakpoint.to_string(),
        });
    };

    let mut parts = vec![format!("({}: {value})", options.kind)];
    if let Some(orientation) = options.orientation {
        parts.push(format!("(orientation: {orientation})"));
    }
    if let Some(prefers) = options.prefers {
        parts.push(format!("(prefers-{prefers})"));
    }

    Ok(format!("@media {}", parts.join(" and ")))
}

/// One media query per registry entry with a threshold, keyed by name.
pub fn create_media_queries(
    breakpoints: &Breakpoints,
    options: &MediaQueryOptions,
) -> QueryResult<IndexMap<String, String>> {
    breakpoints
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, _)| Ok((name.to_string(), generate_media_query(name, breakpoints, options)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Breakpoints {
        Breakpoints::defaults()
    }

    #[test]
    fn base_breakpoint_has_no_query() {
        let query = generate_media_query("base", &defaults(), &MediaQueryOptions::default()).unwrap();
        assert_eq!(query, "");
    }

    #[test]
    fn min_width_is_the_default_type() {
        let query = generate_media_query("md", &defaults(), &MediaQueryOptions::default()).unwrap();
        assert_eq!(query, "@media (min-width: 768px)");
    }

    #[test]
    fn max_width_type_is_honored() {
        let options = MediaQueryOptions::with_kind(MediaQueryType::MaxWidth);
        let query = generate_media_query("md", &defaults(), &options).unwrap();
        assert_eq!(query, "@media (max-width: 768px)");
    }

    #[test]
    fn orientation_and_preference_follow_size_term() {
        let options = MediaQueryOptions {
            orientation: Some(Orientation::Landscape),
            prefers: Some(MediaPreference::ReducedMotion),
            ..MediaQueryOptions::default()
        };
        let query = generate_media_query("md", &defaults(), &options).unwrap();
        assert_eq!(
            query,
            "@media (min-width: 768px) and (orientation: landscape) and (prefers-reduced-motion)"
        );
    }

    #[test]
    fn preference_alone_is_appended() {
        let options = MediaQueryOptions {
            prefers: Some(MediaPreference::Dark),
            ..MediaQueryOptions::default()
        };
        let query = generate_media_query("md", &defaults(), &options).unwrap();
        assert_eq!(query, "@media (min-width: 768px) and (prefers-dark)");
    }

    #[test]
    fn unknown_breakpoint_is_an_error_naming_it() {
        let err = generate_media_query("unknown", &defaults(), &MediaQueryOptions::default())
            .expect_err("unknown breakpoint should fail");
        assert_eq!(
            err,
            QueryError::BreakpointNotFound {
                breakpoint: "unknown".to_string()
            }
        );
        assert!(err.to_string().contains("unknown"));
        assert_eq!(err.to_string(), "Breakpoint \"unknown\" not found");
    }

    #[test]
    fn media_queries_cover_every_breakpoint() {
        let queries = create_media_queries(&defaults(), &MediaQueryOptions::default()).unwrap();
        let collected: Vec<_> = queries.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            collected,
            vec![
                ("xs", "@media (min-width: 480px)"),
                ("sm", "@media (min-width: 640px)"),
                ("md", "@media (min-width: 768px)"),
                ("lg", "@media (min-width: 1024px)"),
                ("xl", "@media (min-width: 1280px)"),
                ("2xl", "@media (min-width: 1536px)"),
            ]
        );
    }

    #[test]
    fn options_deserialize_from_kebab_case() {
        let options: MediaQueryOptions =
            serde_json::from_str(r#"{"type": "max-width", "prefers": "reduced-motion"}"#).unwrap();
        assert_eq!(options.kind, MediaQueryType::MaxWidth);
        assert_eq!(options.prefers, Some(MediaPreference::ReducedMotion));
        assert_eq!(options.orientation, None);
    }
}
