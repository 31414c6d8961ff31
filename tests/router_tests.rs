use brrtapi::handlers::{Handler, HandlerRegistry};
use brrtapi::result::{ApiResult, Passthrough};
use brrtapi::router::{RequestContext, RouteState, Router};
use brrtapi::table::{load_table_from_str, EndpointDescriptor, EndpointTable};
use http::Method;
use serde_json::json;
use std::sync::Arc;

fn items_table() -> EndpointTable {
    EndpointTable::compile(
        vec![EndpointDescriptor::new(
            "GET",
            r"^/v1/items/\d+$",
            "Base",
            "show",
            false,
        )],
        &HandlerRegistry::with_builtins(),
    )
    .expect("valid table")
}

fn zoo_table() -> EndpointTable {
    let yaml = r#"
endpoints:
  - { method: GET,    path: '^/zoo/animals$',        kind: Echo, callback: list }
  - { method: POST,   path: '^/zoo/animals$',        kind: Echo, callback: create, protected: true }
  - { method: GET,    path: '^/zoo/animals/[^/]+$',  kind: Echo, callback: show }
  - { method: DELETE, path: '^/zoo/animals/[^/]+$',  kind: Echo, callback: remove, protected: true }
  - { method: GET,    path: '^/zoo/',                kind: Base, callback: describe }
"#;
    load_table_from_str(yaml, &HandlerRegistry::with_builtins()).expect("valid table")
}

#[test]
fn test_get_item_resolves() {
    let router = Router::new(&items_table(), Method::GET, "/v1/items/42");
    assert_eq!(router.state(), RouteState::Resolved);
    assert_eq!(router.callback_name(), Some("show"));
    assert_eq!(router.is_protected(), Some(false));
    assert_eq!(router.segment(2), Some("items"));
    assert_eq!(router.segments(), ["", "v1", "items", "42"]);
    assert_eq!(router.handler().map(|h| h.name()), Some("Base"));
}

#[test]
fn test_method_mismatch_is_unresolved() {
    let router = Router::new(&items_table(), Method::POST, "/v1/items/42");
    assert_eq!(router.state(), RouteState::Unresolved);
    assert_eq!(router.is_protected(), None);
    assert_eq!(router.callback_name(), None);
    assert!(router.handler().is_none());
}

#[test]
fn test_pattern_tested_against_full_raw_path() {
    let table = items_table();
    assert!(!Router::new(&table, Method::GET, "/v1/items/42/extra").is_resolved());
    assert!(!Router::new(&table, Method::GET, "/v1/items/abc").is_resolved());
}

#[test]
fn test_method_is_case_sensitive() {
    let method = Method::from_bytes(b"get").expect("extension method");
    assert!(!Router::new(&items_table(), method, "/v1/items/42").is_resolved());
}

#[test]
fn test_zoo_verbs() {
    let table = zoo_table();
    let cases = [
        (Method::GET, "/zoo/animals", Some("list"), Some(false)),
        (Method::POST, "/zoo/animals", Some("create"), Some(true)),
        (Method::GET, "/zoo/animals/7", Some("show"), Some(false)),
        (Method::DELETE, "/zoo/animals/7", Some("remove"), Some(true)),
        (Method::GET, "/zoo/health", Some("describe"), Some(false)),
        (Method::PUT, "/zoo/animals/7", None, None),
        (Method::GET, "/elsewhere", None, None),
    ];
    for (method, path, callback, protected) in cases {
        let router = Router::new(&table, method.clone(), path);
        assert_eq!(router.callback_name(), callback, "{method} {path}");
        assert_eq!(router.is_protected(), protected, "{method} {path}");
    }
}

#[test]
fn test_double_slashes_keep_positions() {
    let router = Router::new(&zoo_table(), Method::GET, "/zoo//x");
    assert_eq!(router.callback_name(), Some("describe"));
    assert_eq!(router.segments(), ["", "zoo", "", "x"]);
    assert_eq!(router.segment(2), Some(""));
    assert_eq!(router.segment(3), Some("x"));
}

#[test]
fn test_execute_base_describe() {
    let mut router = Router::new(&zoo_table(), Method::GET, "/zoo/health");
    let result = router.execute(Arc::new(Passthrough)).expect("resolved");
    assert!(result.status());
    assert_eq!(
        result.data().to_value(),
        json!({
            "kind": "Base",
            "callback": "describe",
            "protected": false,
            "method": "GET",
            "path": "/zoo/health",
        })
    );
}

#[test]
fn test_execute_unresolved_returns_none() {
    let mut router = Router::new(&EndpointTable::empty(), Method::GET, "/");
    assert!(router.execute(Arc::new(Passthrough)).is_none());
}

struct Counter {
    seen_callback: String,
}

impl Handler for Counter {
    fn name(&self) -> &str {
        "Counter"
    }

    fn execute(&mut self, ctx: &RequestContext, result: &mut ApiResult) {
        result
            .set_valid_values(json!(self.seen_callback), false)
            .set_secondary_value("last_segment", json!(ctx.segments().last()));
    }
}

#[test]
fn test_custom_kind_is_built_from_context() {
    let mut registry = HandlerRegistry::with_builtins();
    registry.register("Counter", |ctx| {
        Box::new(Counter {
            seen_callback: ctx.callback_name().unwrap_or_default().to_string(),
        })
    });
    let table = EndpointTable::compile(
        vec![EndpointDescriptor::new("GET", "^/count/", "Counter", "tally", false)],
        &registry,
    )
    .expect("valid table");

    let mut router = Router::new(&table, Method::GET, "/count/9");
    assert_eq!(router.handler_kind(), Some("Counter"));
    let result = router.execute(Arc::new(Passthrough)).expect("resolved");
    assert_eq!(result.data().to_value(), json!("tally"));
    assert_eq!(result.get_secondary_value("last_segment"), Some(&json!("9")));
}

#[test]
fn test_unsupported_kind_shadows_later_entries() {
    let table = EndpointTable::compile(
        vec![
            EndpointDescriptor::new("GET", "^/a$", "Legacy", "old", false),
            EndpointDescriptor::new("GET", "^/a$", "Base", "ping", false),
        ],
        &HandlerRegistry::with_builtins(),
    )
    .expect("unknown kinds are not table errors");
    assert_eq!(table.len(), 2);
    assert!(!table.iter().next().is_some_and(|e| e.is_supported()));

    let router = Router::new(&table, Method::GET, "/a");
    assert!(!router.is_resolved());
    assert_eq!(router.is_protected(), None);
}
