//! The route table: ordered routes per method plus mounted sub-routers.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::error::{Result, RouterError};
use crate::method::Method;
use crate::options::RouteOptions;
use crate::params::PathParams;
use crate::pattern::split_path;
use crate::route::{Action, Route, fill_template, join_prefix, route_key};

/// Outcome of a successful [`RouteTable::match_route`].
pub enum RouteMatch<'a, H> {
    /// An ordinary route matched.
    Action {
        /// The route's handler.
        handler: &'a H,
        /// Values captured by named segments.
        params: PathParams,
        /// The route's options.
        options: &'a RouteOptions,
        /// The template that matched.
        template: &'a str,
    },
    /// A mount prefix matched; the rest of the path belongs to `sub_app`.
    Delegate {
        /// The mounted router.
        sub_app: &'a Arc<RouteTable<H>>,
        /// `/` followed by the components after the mount prefix.
        rewritten_path: String,
        /// The path as it reached this table.
        original_path: String,
        /// The mount's options.
        options: &'a RouteOptions,
    },
}

impl<H> fmt::Debug for RouteMatch<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action {
                params, template, ..
            } => f
                .debug_struct("Action")
                .field("template", template)
                .field("params", params)
                .finish_non_exhaustive(),
            Self::Delegate {
                rewritten_path,
                original_path,
                ..
            } => f
                .debug_struct("Delegate")
                .field("rewritten_path", rewritten_path)
                .field("original_path", original_path)
                .finish_non_exhaustive(),
        }
    }
}

/// Routes grouped by method, matched in registration order.
///
/// Build a table with the registration methods, then share it read-only
/// (usually behind an [`Arc`]). Matching takes `&self` and never mutates,
/// so a built table can serve any number of threads without locking.
///
/// # Example
///
/// ```
/// use trailhead_router::{RouteMatch, RouteOptions, RouteTable, Method};
///
/// let mut table = RouteTable::new();
/// table.add_route(Method::Get, "/", "index", RouteOptions::new());
/// table.add_route(Method::Get, "/user/:id", "show_user", RouteOptions::new());
///
/// match table.match_route("/user/1", "GET") {
///     Some(RouteMatch::Action { handler, params, .. }) => {
///         assert_eq!(*handler, "show_user");
///         assert_eq!(params.get("id"), Some("1"));
///     }
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
pub struct RouteTable<H> {
    /// Routes per method, including mounts under [`Method::Mount`]. Methods
    /// iterate in the order they were first registered.
    routes: IndexMap<Method, Vec<Route<H>>>,
    /// Explicit route names to effective templates.
    names: HashMap<String, String>,
    /// Derived route keys to effective templates.
    keys: HashMap<String, String>,
    /// Every reachable (name, effective template) pair in registration order.
    templates: Vec<(Option<String>, String)>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RouteTable<H> {
    /// Creates a new empty table.
    pub fn new() -> Self {
        Self {
            routes: IndexMap::new(),
            names: HashMap::new(),
            keys: HashMap::new(),
            templates: Vec::new(),
        }
    }

    /// Registers a route.
    ///
    /// Duplicate method and template pairs are kept; the first one wins.
    pub fn add_route(&mut self, method: Method, template: &str, handler: H, options: RouteOptions) {
        self.push(Route::new(method, template, Action::Handler(handler), options));
    }

    /// Registers a route that can also be reverse-routed by `name`.
    pub fn add_named_route(
        &mut self,
        name: &str,
        method: Method,
        template: &str,
        handler: H,
        options: RouteOptions,
    ) {
        self.push(Route::new(method, template, Action::Handler(handler), options).name(name));
    }

    /// Delegates every path under `prefix` to `sub_app`.
    ///
    /// Only literal prefixes can match. Mounts are tried in registration
    /// order after all ordinary routes have failed.
    pub fn mount(&mut self, prefix: &str, sub_app: Arc<Self>, options: RouteOptions) {
        for (name, template) in &sub_app.templates {
            self.register_path(name.as_deref(), join_prefix(prefix, template));
        }
        let route = Route::new(Method::Mount, prefix, Action::Mount(sub_app), options);
        if route.pattern.segments().iter().any(|s| !s.is_literal()) {
            warn!(prefix, "mount prefix has non-literal segments and will never match");
        }
        debug!(prefix, "mounted sub-router");
        self.routes.entry(Method::Mount).or_default().push(route);
    }

    fn push(&mut self, route: Route<H>) {
        if route.method.is_mount() {
            warn!(
                template = route.template(),
                "handler registered under MOUNT is unreachable"
            );
        } else {
            self.register_path(route.name.as_deref(), route.template().to_string());
        }
        debug!(method = %route.method, template = route.template(), "registered route");
        self.routes.entry(route.method).or_default().push(route);
    }

    fn register_path(&mut self, name: Option<&str>, template: String) {
        if let Some(name) = name {
            self.names
                .entry(name.to_string())
                .or_insert_with(|| template.clone());
        }
        self.keys
            .entry(route_key(&template))
            .or_insert_with(|| template.clone());
        self.templates.push((name.map(str::to_string), template));
    }

    /// Ordinary routes registered for `method`, in registration order.
    pub fn routes_for(&self, method: Method) -> &[Route<H>] {
        self.routes.get(&method).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mount entries, in registration order.
    pub fn mounts(&self) -> &[Route<H>] {
        self.routes_for(Method::Mount)
    }

    /// Number of entries in this table, mounts included, not counting
    /// routes inside mounted routers.
    pub fn len(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    /// Returns true when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.routes.values().all(Vec::is_empty)
    }

    /// Resolves a request path and method.
    ///
    /// Ordinary routes for the method are tried first, in registration
    /// order; the first whose segment count and matchers all agree wins.
    /// Failing that, mounts are tried in registration order. `None` means
    /// nothing matched.
    pub fn match_route<'a>(&'a self, path: &str, method: &str) -> Option<RouteMatch<'a, H>> {
        let parts = split_path(path);

        if let Some(method) = method.parse::<Method>().ok().filter(|m| !m.is_mount()) {
            for route in self.routes_for(method) {
                trace!(template = route.template(), "trying route");
                let Action::Handler(handler) = &route.action else {
                    continue;
                };
                if let Some(params) = route.pattern.match_parts(&parts) {
                    debug!(%method, path, template = route.template(), "route matched");
                    return Some(RouteMatch::Action {
                        handler,
                        params,
                        options: &route.options,
                        template: route.template(),
                    });
                }
            }
        }

        for mount in self.mounts() {
            let Action::Mount(sub_app) = &mount.action else {
                continue;
            };
            if let Some(consumed) = mount.pattern.match_prefix(&parts) {
                let rewritten_path = format!("/{}", parts[consumed..].join("/"));
                debug!(
                    path,
                    prefix = mount.template(),
                    rewritten = %rewritten_path,
                    "delegating to mounted router"
                );
                return Some(RouteMatch::Delegate {
                    sub_app,
                    rewritten_path,
                    original_path: path.to_string(),
                    options: &mount.options,
                });
            }
        }

        debug!(method, path, "no route matched");
        None
    }

    /// Builds a concrete path for the route registered under `key`.
    ///
    /// `key` is either an explicit route name or a key derived from the
    /// template (see [`route_key`]). Mounted routes are reachable through
    /// their prefixed template.
    pub fn generate_path<S: AsRef<str>>(&self, key: &str, values: &[S]) -> Result<String> {
        let template = self
            .names
            .get(key)
            .or_else(|| self.keys.get(key))
            .ok_or_else(|| RouterError::UnknownRoute(key.to_string()))?;
        fill_template(template, values)
    }

    /// Visits every concrete route, with mounted routes flattened in and
    /// their templates prefixed by the mount path.
    ///
    /// Methods come in first-registration order and routes within a method
    /// in registration order. Mounts sit under [`Method::Mount`] like any
    /// other method, so their routes appear where the first mount was added.
    pub fn for_each_route<F>(&self, mut visitor: F)
    where
        F: FnMut(&Route<H>),
        H: Clone,
    {
        self.visit("", &mut visitor);
    }

    /// Collects the flattened route list.
    pub fn routes(&self) -> Vec<Route<H>>
    where
        H: Clone,
    {
        let mut routes = Vec::new();
        self.for_each_route(|route| routes.push(route.clone()));
        routes
    }

    fn visit(&self, prefix: &str, visitor: &mut dyn FnMut(&Route<H>))
    where
        H: Clone,
    {
        for route in self.routes.values().flatten() {
            match &route.action {
                Action::Mount(sub_app) => {
                    sub_app.visit(&join_prefix(prefix, route.template()), visitor);
                }
                Action::Handler(_) if route.method.is_mount() => {}
                Action::Handler(_) if prefix.is_empty() => visitor(route),
                Action::Handler(_) => visitor(&route.derive_with_prefix(prefix)),
            }
        }
    }
}

impl<H> fmt::Debug for RouteTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}
