//! # trailhead-router
//!
//! Ordered route tables with path variables, prefix wildcards and mountable
//! sub-routers.
//!
//! This crate provides:
//! - Path templates compiled to per-segment matchers
//! - First-registered-first-matched routing per HTTP method
//! - Mounting whole path subtrees onto nested tables
//! - Reverse routing by route name or derived key
//!
//! ## Quick Start
//!
//! ```
//! use trailhead_router::{Method, RouteMatch, RouteOptions, RouteTable};
//!
//! let mut table = RouteTable::new();
//! table.add_route(Method::Get, "/", "index", RouteOptions::new());
//! table.add_route(Method::Get, "/user/:id", "show_user", RouteOptions::new());
//! table.add_route(Method::Post, "/user", "create_user", RouteOptions::new());
//!
//! let Some(RouteMatch::Action { handler, params, .. }) = table.match_route("/user/1", "GET") else {
//!     panic!("expected a match");
//! };
//! assert_eq!(*handler, "show_user");
//! assert_eq!(params.get("id"), Some("1"));
//! ```
//!
//! ## Path Templates
//!
//! | component | matches                                           |
//! |-----------|---------------------------------------------------|
//! | `users`   | exactly `users`                                   |
//! | `:id`     | any component of word characters and `-`, captured as `id` |
//! | `img*`    | any component starting with `img`, ignoring case |
//!
//! ## Mounting
//!
//! ```
//! use std::sync::Arc;
//! use trailhead_router::{Method, RouteMatch, RouteOptions, RouteTable};
//!
//! let mut admin = RouteTable::new();
//! admin.add_route(Method::Get, "/", "dashboard", RouteOptions::new());
//!
//! let mut table = RouteTable::new();
//! table.mount("/admin", Arc::new(admin), RouteOptions::new());
//!
//! let Some(RouteMatch::Delegate { sub_app, rewritten_path, .. }) =
//!     table.match_route("/admin", "GET")
//! else {
//!     panic!("expected delegation");
//! };
//! assert_eq!(rewritten_path, "/");
//! assert!(sub_app.match_route(&rewritten_path, "GET").is_some());
//! ```
//!
//! ## Reverse Routing
//!
//! ```
//! use trailhead_router::{Method, RouteOptions, RouteTable};
//!
//! let mut table = RouteTable::new();
//! table.add_named_route("package", Method::Get, "/user/:id/packages/:pid", (), RouteOptions::new());
//!
//! assert_eq!(table.generate_path("package", &["1", "2"]).unwrap(), "/user/1/packages/2");
//! assert_eq!(table.generate_path("user_id_packages_pid", &["1", "2"]).unwrap(), "/user/1/packages/2");
//! ```

mod error;
mod method;
mod options;
mod params;
mod pattern;
mod route;
mod table;

pub use error::{Result, RouterError};
pub use method::{Method, UnknownMethod};
pub use options::RouteOptions;
pub use params::PathParams;
pub use pattern::{PathPattern, PathSegment, split_path};
pub use route::{Action, Route, route_key};
pub use table::{RouteMatch, RouteTable};
