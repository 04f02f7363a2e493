//! End-to-end routing scenarios against a fully built table.

use std::sync::Arc;
use std::thread;

use trailhead_router::{Method, PathParams, RouteMatch, RouteOptions, RouteTable, RouterError};

type Table = RouteTable<&'static str>;

fn resolve(table: &Table, path: &str, method: &str) -> Option<(&'static str, PathParams)> {
    match table.match_route(path, method)? {
        RouteMatch::Action {
            handler, params, ..
        } => Some((*handler, params)),
        RouteMatch::Delegate {
            sub_app,
            rewritten_path,
            ..
        } => resolve(sub_app, &rewritten_path, method),
    }
}

// =============================================================================
// Plain routes
// =============================================================================

#[test]
fn user_route_wins_over_root_and_post() {
    let mut table = Table::new();
    table.add_route(Method::Get, "/", "root", RouteOptions::new());
    table.add_route(Method::Get, "/user/:id", "show_user", RouteOptions::new());
    table.add_route(Method::Post, "/user", "create_user", RouteOptions::new());

    let (handler, params) = resolve(&table, "/user/1", "GET").unwrap();
    assert_eq!(handler, "show_user");
    assert_eq!(params.get("id"), Some("1"));
    assert_eq!(params.len(), 1);

    assert_eq!(resolve(&table, "/user", "POST").unwrap().0, "create_user");
    assert_eq!(resolve(&table, "/", "GET").unwrap().0, "root");
    assert!(resolve(&table, "/user", "GET").is_none());
}

#[test]
fn every_literal_route_matches_itself() {
    let routes = [
        (Method::Get, "/"),
        (Method::Get, "/about"),
        (Method::Put, "/settings/profile"),
        (Method::Delete, "/sessions/current"),
        (Method::Head, "/health"),
        (Method::Link, "/docs/a"),
        (Method::Unlink, "/docs/a"),
    ];
    let mut table = RouteTable::new();
    for (i, (method, path)) in routes.iter().enumerate() {
        table.add_route(*method, path, i, RouteOptions::new());
    }

    for (i, (method, path)) in routes.iter().enumerate() {
        match table.match_route(path, method.as_str()) {
            Some(RouteMatch::Action { handler, params, .. }) => {
                assert_eq!(*handler, i, "{method} {path}");
                assert!(params.is_empty());
            }
            other => panic!("{method} {path}: {other:?}"),
        }
    }
}

#[test]
fn named_segment_rejects_spaces() {
    let mut table = Table::new();
    table.add_route(Method::Get, "/user/:id", "show_user", RouteOptions::new());
    assert!(resolve(&table, "/user/a b", "GET").is_none());
    assert!(resolve(&table, "/user/a%20b", "GET").is_none());
}

#[test]
fn generated_paths_match_back_to_the_same_values() {
    let templates = [
        "/user/:id",
        "/user/:id/packages/:package_id",
        "/org/:org/repo/:repo/issues/:number",
    ];
    let values = ["acme", "trail-head", "42"];

    let mut table = RouteTable::new();
    for template in templates {
        table.add_route(Method::Get, template, template, RouteOptions::new());
    }

    for route in table.routes() {
        let names: Vec<&str> = route.pattern.variable_names().map(|(_, n)| n).collect();
        let supplied = &values[..names.len()];
        let path = route.generate_path(supplied).unwrap();

        let (handler, params) = resolve(&table, &path, "GET").unwrap();
        assert_eq!(handler, route.template());
        for (name, value) in names.iter().zip(supplied) {
            assert_eq!(params.get(name), Some(*value));
        }
    }
}

#[test]
fn arity_mismatch_exactly_when_counts_differ() {
    let mut table = Table::new();
    table.add_route(Method::Get, "/a/:x/b/:y", "two", RouteOptions::new());
    table.add_route(Method::Get, "/static", "none", RouteOptions::new());

    let values = ["1", "2", "3"];
    for supplied in 0..=values.len() {
        let result = table.generate_path("a_x_b_y", &values[..supplied]);
        assert_eq!(result.is_ok(), supplied == 2, "supplied {supplied}");

        let result = table.generate_path("static", &values[..supplied]);
        match result {
            Ok(path) => {
                assert_eq!(supplied, 0);
                assert_eq!(path, "/static");
            }
            Err(RouterError::ArityMismatch { expected, .. }) => assert_eq!(expected, 0),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}

// =============================================================================
// Mounting
// =============================================================================

#[test]
fn mounted_router_sees_rewritten_path() {
    let mut sub = Table::new();
    sub.add_route(Method::Get, "/", "sub_root", RouteOptions::new());
    let sub = Arc::new(sub);

    let mut table = Table::new();
    table.mount("/test", Arc::clone(&sub), RouteOptions::new());

    let Some(RouteMatch::Delegate {
        sub_app,
        rewritten_path,
        original_path,
        ..
    }) = table.match_route("/test/new", "GET")
    else {
        panic!("expected delegation");
    };
    assert!(Arc::ptr_eq(sub_app, &sub));
    assert_eq!(rewritten_path, "/new");
    assert_eq!(original_path, "/test/new");
    assert!(sub_app.match_route(&rewritten_path, "GET").is_none());

    assert_eq!(resolve(&table, "/test", "GET").unwrap().0, "sub_root");
}

#[test]
fn mounted_root_post_handler() {
    let mut sub = Table::new();
    sub.add_route(Method::Post, "/", "mounted_root", RouteOptions::new());

    let mut table = Table::new();
    table.mount("/mounted", Arc::new(sub), RouteOptions::new());

    match table.match_route("/mounted", "POST") {
        Some(RouteMatch::Delegate { rewritten_path, .. }) => assert_eq!(rewritten_path, "/"),
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(resolve(&table, "/mounted", "POST").unwrap().0, "mounted_root");
    assert_eq!(resolve(&table, "/mounted/", "POST").unwrap().0, "mounted_root");
}

#[test]
fn delegation_keeps_remaining_components() {
    let mut sub = Table::new();
    sub.add_route(Method::Get, "/files/:name", "file", RouteOptions::new());

    let mut table = Table::new();
    table.mount("/api/v1", Arc::new(sub), RouteOptions::new());

    match table.match_route("/api/v1/files/report-2024", "GET") {
        Some(RouteMatch::Delegate { rewritten_path, .. }) => {
            assert_eq!(rewritten_path, "/files/report-2024");
        }
        other => panic!("unexpected: {other:?}"),
    }
    let (handler, params) = resolve(&table, "/api/v1/files/report-2024", "GET").unwrap();
    assert_eq!(handler, "file");
    assert_eq!(params.get("name"), Some("report-2024"));
}

#[test]
fn shared_sub_router_under_two_prefixes() {
    let mut sub = Table::new();
    sub.add_route(Method::Get, "/status", "status", RouteOptions::new());
    let sub = Arc::new(sub);

    let mut table = Table::new();
    table.mount("/a", Arc::clone(&sub), RouteOptions::new());
    table.mount("/b", Arc::clone(&sub), RouteOptions::new());

    assert_eq!(resolve(&table, "/a/status", "GET").unwrap().0, "status");
    assert_eq!(resolve(&table, "/b/status", "GET").unwrap().0, "status");

    let templates: Vec<String> = table
        .routes()
        .iter()
        .map(|r| r.template().to_string())
        .collect();
    assert_eq!(templates, vec!["/a/status", "/b/status"]);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn frozen_table_serves_many_threads() {
    let mut table = Table::new();
    table.add_route(Method::Get, "/user/:id", "show_user", RouteOptions::new());
    let table = Arc::new(table);

    let workers: Vec<_> = (0..8)
        .map(|i| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                let path = format!("/user/{i}");
                let (handler, params) = resolve(&table, &path, "GET").unwrap();
                assert_eq!(handler, "show_user");
                params.parse::<usize>("id")
            })
        })
        .collect();

    for (i, worker) in workers.into_iter().enumerate() {
        assert_eq!(worker.join().unwrap(), Some(i));
    }
}
