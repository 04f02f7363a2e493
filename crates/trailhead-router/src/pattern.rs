//! Path pattern compilation and matching.
//!
//! A template such as `/user/:id/files/img*` compiles to one matcher per
//! `/`-delimited component:
//!
//! - `:name` captures any component made only of word characters or `-`
//! - `prefix*` accepts any component starting with `prefix`, ignoring case
//! - anything else must match exactly
//!
//! Compilation never fails. Components that look malformed (a lone `:`)
//! are kept as literals, and runs of `/` count as a single separator.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::params::PathParams;

/// Values a named segment is allowed to capture.
static NAMED_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid named segment regex"));

/// Splits a path into its non-empty components.
///
/// Leading, trailing and repeated slashes are all dropped, so `//a///b/`
/// yields `["a", "b"]` and both `""` and `"/"` yield nothing.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// A segment in a path pattern.
#[derive(Debug, Clone)]
pub enum PathSegment {
    /// A literal string segment.
    Literal(String),
    /// A named variable segment (e.g., `:id`).
    Named(String),
    /// A component matched by case-insensitive prefix (e.g., `img*`).
    PrefixWildcard {
        /// Text before the `*`.
        prefix: String,
        /// Anchored, case-insensitive matcher for `prefix`.
        matcher: Regex,
    },
}

impl PathSegment {
    fn compile(component: &str) -> Self {
        if let Some(name) = component.strip_prefix(':').filter(|n| !n.is_empty()) {
            return Self::Named(name.to_string());
        }
        if let Some(prefix) = component.strip_suffix('*') {
            if let Ok(matcher) = Regex::new(&format!("(?i)^{}", regex::escape(prefix))) {
                return Self::PrefixWildcard {
                    prefix: prefix.to_string(),
                    matcher,
                };
            }
        }
        Self::Literal(component.to_string())
    }

    /// Returns true if this segment accepts the given path component.
    #[must_use]
    pub fn accepts(&self, part: &str) -> bool {
        match self {
            Self::Literal(text) => text == part,
            Self::Named(_) => NAMED_VALUE.is_match(part),
            Self::PrefixWildcard { matcher, .. } => matcher.is_match(part),
        }
    }

    /// The variable name, for named segments.
    #[must_use]
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true for literal segments.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// A compiled path pattern for matching URLs.
#[derive(Debug, Clone)]
pub struct PathPattern {
    /// The original template string.
    template: String,
    /// Compiled segments, in path order.
    segments: Vec<PathSegment>,
}

impl PathPattern {
    /// Compiles a path template.
    ///
    /// # Example
    ///
    /// ```
    /// use trailhead_router::PathPattern;
    ///
    /// let pattern = PathPattern::new("/user/:id/packages/:package_id");
    /// let params = pattern.match_path("/user/42/packages/7").unwrap();
    /// assert_eq!(params.get("id"), Some("42"));
    /// assert_eq!(params.get("package_id"), Some("7"));
    /// ```
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
            segments: split_path(template)
                .into_iter()
                .map(PathSegment::compile)
                .collect(),
        }
    }

    /// Returns the original template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the compiled segments.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments. An empty template has none.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true when the pattern only matches the empty path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Variable names keyed by segment index, in path order.
    pub fn variable_names(&self) -> impl Iterator<Item = (usize, &str)> {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.variable_name().map(|name| (i, name)))
    }

    /// Number of named segments.
    pub fn variable_count(&self) -> usize {
        self.variable_names().count()
    }

    /// Matches already-split path components.
    ///
    /// The component count must equal the segment count exactly.
    pub fn match_parts(&self, parts: &[&str]) -> Option<PathParams> {
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            if !segment.accepts(part) {
                return None;
            }
            if let Some(name) = segment.variable_name() {
                params.insert(name, *part);
            }
        }
        Some(params)
    }

    /// Attempts to match a path against this pattern.
    ///
    /// Returns extracted parameters if the path matches.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        self.match_parts(&split_path(path))
    }

    /// Matches this pattern as a literal mount prefix.
    ///
    /// Returns the number of components consumed. Non-literal segments never
    /// match here.
    pub fn match_prefix(&self, parts: &[&str]) -> Option<usize> {
        if parts.len() < self.segments.len() {
            return None;
        }
        self.segments
            .iter()
            .zip(parts)
            .all(|(segment, part)| matches!(segment, PathSegment::Literal(text) if text == part))
            .then_some(self.segments.len())
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
