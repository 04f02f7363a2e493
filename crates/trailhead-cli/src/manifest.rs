//! JSON route manifests.
//!
//! A manifest declares routes and mounts the same way application code
//! would register them:
//!
//! ```json
//! {
//!   "routes": [
//!     {"method": "GET", "path": "/", "handler": "home"},
//!     {"method": "GET", "path": "/user/:id", "name": "user"}
//!   ],
//!   "mounts": [
//!     {"prefix": "/admin", "options": {"auth": true},
//!      "routes": [{"method": "GET", "path": "/"}]}
//!   ]
//! }
//! ```
//!
//! Handlers are labels. A route without one is labelled `"<METHOD> <path>"`.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use trailhead_router::{Method, RouteOptions, RouteTable};

use crate::error::{ManifestError, Result};

/// A route table description.
#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    /// Ordinary routes, in registration order.
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    /// Mounted sub-manifests, in registration order.
    #[serde(default)]
    pub mounts: Vec<MountEntry>,
}

/// One route in a manifest.
#[derive(Debug, Deserialize)]
pub struct RouteEntry {
    /// HTTP method name.
    pub method: String,
    /// Path template.
    pub path: String,
    /// Optional name for reverse routing.
    #[serde(default)]
    pub name: Option<String>,
    /// Handler label.
    #[serde(default)]
    pub handler: Option<String>,
    /// Dispatch options.
    #[serde(default)]
    pub options: RouteOptions,
}

/// A mounted sub-manifest.
#[derive(Debug, Deserialize)]
pub struct MountEntry {
    /// Literal path prefix.
    pub prefix: String,
    /// Options returned with delegations.
    #[serde(default)]
    pub options: RouteOptions,
    /// The mounted routes and mounts.
    #[serde(flatten)]
    pub manifest: Manifest,
}

impl Manifest {
    /// Reads and parses a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds the route table this manifest describes.
    pub fn build(&self) -> Result<RouteTable<String>> {
        let mut table = RouteTable::new();

        for entry in &self.routes {
            let method: Method =
                entry
                    .method
                    .parse()
                    .map_err(|_| ManifestError::UnknownMethod {
                        method: entry.method.clone(),
                        path: entry.path.clone(),
                    })?;
            if method.is_mount() {
                return Err(ManifestError::MountInRoutes(entry.path.clone()));
            }

            let label = entry
                .handler
                .clone()
                .unwrap_or_else(|| format!("{method} {}", entry.path));
            let options = entry.options.clone();
            match &entry.name {
                Some(name) => table.add_named_route(name, method, &entry.path, label, options),
                None => table.add_route(method, &entry.path, label, options),
            }
        }

        for mount in &self.mounts {
            let sub_app = mount.manifest.build()?;
            debug!(prefix = %mount.prefix, routes = sub_app.len(), "built mounted manifest");
            table.mount(&mount.prefix, Arc::new(sub_app), mount.options.clone());
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use trailhead_router::RouteMatch;

    use super::*;

    const SAMPLE: &str = r#"{
        "routes": [
            {"method": "GET", "path": "/", "handler": "home"},
            {"method": "get", "path": "/user/:id", "name": "user"},
            {"method": "POST", "path": "/user", "options": {"accept": "application/json"}}
        ],
        "mounts": [
            {
                "prefix": "/admin",
                "options": {"auth": true},
                "routes": [{"method": "GET", "path": "/", "handler": "dashboard"}],
                "mounts": [
                    {"prefix": "/reports", "routes": [{"method": "GET", "path": "/:year"}]}
                ]
            }
        ]
    }"#;

    fn sample() -> Manifest {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_build_registers_routes_and_labels() {
        let table = sample().build().unwrap();

        match table.match_route("/user/3", "GET") {
            Some(RouteMatch::Action {
                handler, params, ..
            }) => {
                assert_eq!(handler, "GET /user/:id");
                assert_eq!(params.get("id"), Some("3"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        match table.match_route("/user", "POST") {
            Some(RouteMatch::Action { options, .. }) => {
                assert_eq!(
                    options.get("accept").and_then(|v| v.as_str()),
                    Some("application/json")
                );
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_build_nested_mounts() {
        let table = sample().build().unwrap();
        let listing: Vec<(String, String)> = table
            .routes()
            .into_iter()
            .map(|r| (r.template().to_string(), r.handler().cloned().unwrap_or_default()))
            .collect();

        assert_eq!(
            listing,
            vec![
                ("/".to_string(), "home".to_string()),
                ("/user/:id".to_string(), "GET /user/:id".to_string()),
                ("/user".to_string(), "POST /user".to_string()),
                ("/admin/".to_string(), "dashboard".to_string()),
                ("/admin/reports/:year".to_string(), "GET /:year".to_string()),
            ]
        );
        assert_eq!(
            table.generate_path("admin_reports_year", &["2024"]).unwrap(),
            "/admin/reports/2024"
        );
        assert_eq!(table.generate_path("user", &["9"]).unwrap(), "/user/9");
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let manifest: Manifest =
            serde_json::from_str(r#"{"routes": [{"method": "PATCH", "path": "/x"}]}"#).unwrap();
        assert!(matches!(
            manifest.build(),
            Err(ManifestError::UnknownMethod { method, .. }) if method == "PATCH"
        ));
    }

    #[test]
    fn test_mount_method_in_routes_is_rejected() {
        let manifest: Manifest =
            serde_json::from_str(r#"{"routes": [{"method": "MOUNT", "path": "/x"}]}"#).unwrap();
        assert!(matches!(
            manifest.build(),
            Err(ManifestError::MountInRoutes(path)) if path == "/x"
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let manifest = Manifest::load(file.path()).unwrap();
        assert_eq!(manifest.routes.len(), 3);
        assert_eq!(manifest.mounts.len(), 1);
    }

    #[test]
    fn test_load_reports_path_on_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            Manifest::load(&missing),
            Err(ManifestError::Io { path, .. }) if path == missing
        ));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        let err = Manifest::load(&broken).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
