//! # trailhead-dispatch
//!
//! Runs handlers for requests resolved by a `trailhead-router` table.
//!
//! This crate provides:
//! - Request and response values
//! - Async handlers whose return values are coerced into responses
//! - An [`App`] builder with mounting of other apps
//! - Path rewriting across mounts, with the original path kept on the request
//!
//! ## Quick Start
//!
//! ```ignore
//! use trailhead_dispatch::{App, Request, Response};
//!
//! async fn index(_req: Request) -> &'static str {
//!     "Hello, World!"
//! }
//!
//! async fn show_user(req: Request) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::json(&serde_json::json!({"id": id}))
//! }
//!
//! let admin = App::new().get("/", dashboard);
//!
//! let app = App::new()
//!     .get("/", index)
//!     .get("/user/:id", show_user)
//!     .mount("/admin", admin)
//!     .into_shared();
//!
//! let response = app.handle(Request::get("/user/1")).await;
//! ```
//!
//! ## Return Values
//!
//! Handlers may return anything implementing [`IntoResponse`]:
//!
//! | return value                     | response                            |
//! |----------------------------------|-------------------------------------|
//! | `Response`                       | as is                               |
//! | `String`, `&'static str`, bytes  | 200 with that body                  |
//! | `(u16, body)`                    | given status and body               |
//! | `(u16, headers, body)`           | given status, headers and body      |
//! | `serde_json::Value` with `status`| status, `headers` and `body` keys   |
//! | other `serde_json::Value`        | 200 JSON body                       |

mod app;
mod request;
mod response;

pub use app::{App, Handler, handler};
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use trailhead_router::{Method, PathParams, RouteOptions};
