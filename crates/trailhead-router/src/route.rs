//! Route definitions and reverse routing.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::error::{Result, RouterError};
use crate::method::Method;
use crate::options::RouteOptions;
use crate::pattern::{PathPattern, split_path};
use crate::table::RouteTable;

/// Characters that cannot appear in a route key.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("Invalid route key regex"));

/// What a route resolves to.
pub enum Action<H> {
    /// A request handler.
    Handler(H),
    /// A nested router that receives the remainder of the path.
    Mount(Arc<RouteTable<H>>),
}

impl<H> Clone for Action<H>
where
    H: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Self::Handler(h) => Self::Handler(h.clone()),
            Self::Mount(sub) => Self::Mount(Arc::clone(sub)),
        }
    }
}

/// A single route definition.
///
/// Routes are built once at registration and never change afterwards.
pub struct Route<H> {
    /// Optional route name for reverse URL lookup.
    pub name: Option<String>,
    /// HTTP method, or [`Method::Mount`] for sub-routers.
    pub method: Method,
    /// Compiled path pattern, including the source template.
    pub pattern: PathPattern,
    /// Dispatch metadata handed back with a match.
    pub options: RouteOptions,
    /// Handler or mounted router.
    pub action: Action<H>,
}

impl<H> Route<H> {
    /// Creates a new route.
    pub fn new(method: Method, template: &str, action: Action<H>, options: RouteOptions) -> Self {
        Self {
            name: None,
            method,
            pattern: PathPattern::new(template),
            options,
            action,
        }
    }

    /// Sets the route name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The path template this route was registered with.
    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    /// Stable lookup key derived from the template.
    pub fn key(&self) -> String {
        route_key(self.template())
    }

    /// Returns the handler, if this is not a mount.
    pub const fn handler(&self) -> Option<&H> {
        match &self.action {
            Action::Handler(h) => Some(h),
            Action::Mount(_) => None,
        }
    }

    /// Builds a concrete path from positional values.
    ///
    /// # Example
    ///
    /// ```
    /// use trailhead_router::{Action, Method, Route, RouteOptions};
    ///
    /// let route = Route::new(
    ///     Method::Get,
    ///     "/user/:id/packages/:package_id",
    ///     Action::Handler(()),
    ///     RouteOptions::new(),
    /// );
    /// assert_eq!(route.generate_path(&["42", "7"]).unwrap(), "/user/42/packages/7");
    /// assert!(route.generate_path(&["42"]).is_err());
    /// ```
    pub fn generate_path<S: AsRef<str>>(&self, values: &[S]) -> Result<String> {
        fill_template(self.template(), values)
    }

    /// Returns a copy of this route with `prefix` prepended to its template.
    #[must_use]
    pub fn derive_with_prefix(&self, prefix: &str) -> Self
    where
        H: Clone,
    {
        Self {
            name: self.name.clone(),
            method: self.method,
            pattern: PathPattern::new(&join_prefix(prefix, self.template())),
            options: self.options.clone(),
            action: self.action.clone(),
        }
    }
}

impl<H> Clone for Route<H>
where
    H: Clone,
{
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            method: self.method,
            pattern: self.pattern.clone(),
            options: self.options.clone(),
            action: self.action.clone(),
        }
    }
}

impl<H> fmt::Debug for Route<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("template", &self.template())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Prepends a mount prefix to a template.
///
/// A trailing `/` on the prefix is dropped when the template brings its own,
/// so `/` + `/x` gives `/x` rather than `//x`.
pub(crate) fn join_prefix(prefix: &str, template: &str) -> String {
    if template.starts_with('/') {
        format!("{}{template}", prefix.trim_end_matches('/'))
    } else {
        format!("{prefix}{template}")
    }
}

/// Derives the lookup key for a template: `/user/:id/files` becomes
/// `user_id_files`, `/` becomes `root`.
pub fn route_key(template: &str) -> String {
    let words: Vec<String> = split_path(template)
        .into_iter()
        .map(|part| {
            let bare = part.strip_prefix(':').unwrap_or(part);
            let bare = bare.strip_suffix('*').unwrap_or(bare);
            NON_WORD.replace_all(bare, "_").trim_matches('_').to_string()
        })
        .filter(|word| !word.is_empty())
        .collect();

    if words.is_empty() {
        "root".to_string()
    } else {
        words.join("_")
    }
}

/// Replaces each `:name` component of `template`, left to right, with the
/// next value.
pub(crate) fn fill_template<S: AsRef<str>>(template: &str, values: &[S]) -> Result<String> {
    let is_variable = |piece: &str| piece.len() > 1 && piece.starts_with(':');
    let expected = template.split('/').filter(|p| is_variable(p)).count();

    if values.len() != expected {
        return Err(RouterError::ArityMismatch {
            template: template.to_string(),
            expected,
            supplied: values.len(),
        });
    }
    if expected == 0 {
        return Ok(template.to_string());
    }

    let mut values = values.iter();
    let pieces: Vec<&str> = template
        .split('/')
        .map(|piece| {
            if is_variable(piece) {
                values.next().map_or(piece, |v| v.as_ref())
            } else {
                piece
            }
        })
        .collect();
    Ok(pieces.join("/"))
}
