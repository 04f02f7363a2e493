//! Application builder and request dispatch.

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tracing::debug;
use trailhead_router::{Method, RouteMatch, RouteOptions, RouteTable};

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A boxed async handler function.
pub type Handler = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// Wraps an async function into a [`Handler`], coercing whatever it returns
/// into a [`Response`].
pub fn handler<F, Fut, R>(f: F) -> Handler
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    Arc::new(move |req| {
        let fut = f(req);
        async move { fut.await.into_response() }.boxed()
    })
}

/// An application: a route table of handlers plus the dispatch loop.
///
/// Build with the chained registration methods, then share through
/// [`App::into_shared`]. The table is never modified after that.
pub struct App {
    table: RouteTable<Handler>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new empty app.
    pub fn new() -> Self {
        Self {
            table: RouteTable::new(),
        }
    }

    /// Adds a GET route.
    #[must_use]
    pub fn get<F, Fut, R>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.route(Method::Get, path, handler)
    }

    /// Adds a POST route.
    #[must_use]
    pub fn post<F, Fut, R>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.route(Method::Post, path, handler)
    }

    /// Adds a PUT route.
    #[must_use]
    pub fn put<F, Fut, R>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.route(Method::Put, path, handler)
    }

    /// Adds a DELETE route.
    #[must_use]
    pub fn delete<F, Fut, R>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.route(Method::Delete, path, handler)
    }

    /// Adds a HEAD route.
    #[must_use]
    pub fn head<F, Fut, R>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.route(Method::Head, path, handler)
    }

    /// Adds a LINK route.
    #[must_use]
    pub fn link<F, Fut, R>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.route(Method::Link, path, handler)
    }

    /// Adds an UNLINK route.
    #[must_use]
    pub fn unlink<F, Fut, R>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.route(Method::Unlink, path, handler)
    }

    /// Adds a route with any method.
    #[must_use]
    pub fn route<F, Fut, R>(self, method: Method, path: &str, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.route_with_options(method, path, RouteOptions::new(), f)
    }

    /// Adds a route carrying dispatch options.
    #[must_use]
    pub fn route_with_options<F, Fut, R>(
        mut self,
        method: Method,
        path: &str,
        options: RouteOptions,
        f: F,
    ) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.table.add_route(method, path, handler(f), options);
        self
    }

    /// Adds a named route for [`App::url_for`].
    #[must_use]
    pub fn named_route<F, Fut, R>(mut self, name: &str, method: Method, path: &str, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.table
            .add_named_route(name, method, path, handler(f), RouteOptions::new());
        self
    }

    /// Mounts another app under `prefix`.
    #[must_use]
    pub fn mount(self, prefix: &str, sub_app: Self) -> Self {
        self.mount_with_options(prefix, sub_app, RouteOptions::new())
    }

    /// Mounts another app under `prefix` with options inherited by its routes.
    #[must_use]
    pub fn mount_with_options(mut self, prefix: &str, sub_app: Self, options: RouteOptions) -> Self {
        self.table.mount(prefix, Arc::new(sub_app.table), options);
        self
    }

    /// Generates a URL for a route name or derived key.
    pub fn url_for<S: AsRef<str>>(&self, key: &str, values: &[S]) -> trailhead_router::Result<String> {
        self.table.generate_path(key, values)
    }

    /// The underlying route table.
    pub fn table(&self) -> &RouteTable<Handler> {
        &self.table
    }

    /// Freezes the app for sharing across tasks.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Handles an incoming request.
    ///
    /// Mount matches rewrite the request path and continue in the mounted
    /// table; the first rewrite records [`Request::original_path`].
    pub fn handle(&self, mut request: Request) -> BoxFuture<'_, Response> {
        async move {
            let mut table = &self.table;

            let handler = loop {
                table = match table.match_route(&request.path, &request.method) {
                    Some(RouteMatch::Action {
                        handler,
                        params,
                        options,
                        template,
                    }) => {
                        debug!(method = %request.method, path = %request.path, template, "dispatching");
                        request.params = params;
                        request.options.extend(options);
                        break Arc::clone(handler);
                    }
                    Some(RouteMatch::Delegate {
                        sub_app,
                        rewritten_path,
                        original_path,
                        options,
                    }) => {
                        request.original_path.get_or_insert(original_path);
                        request.path = rewritten_path;
                        request.options.extend(options);
                        sub_app.as_ref()
                    }
                    None => {
                        debug!(
                            method = %request.method,
                            path = request.original_path(),
                            "not found"
                        );
                        return Response::not_found();
                    }
                };
            };

            handler(request).await
        }
        .boxed()
    }
}
