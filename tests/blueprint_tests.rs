#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{install, RecordingApp};
use http::Method;
use routedoc::prelude::*;
use routedoc::router::RouterError;

#[test]
fn test_blueprint_routes_are_prefixed_and_documented() {
    let (spec, mut app) = install(RecordingApp::default(), DocsConfig::new(true));

    let mut items = app
        .register_blueprint("items".to_string(), Some("v1_"), Some("/v1"))
        .unwrap();
    assert_eq!(items.registration(), "registered:items");
    assert_eq!(items.url_prefix(), "/v1");
    assert_eq!(items.name_prefix(), Some("v1_"));

    let returned = items.route("/items", RouteOptions::new()).unwrap();
    assert_eq!(returned, 1);

    assert_eq!(spec.paths(), vec!["/v1/items"]);
    assert!(spec.operation("/v1/items", "get").is_some());
    assert_eq!(app.app().paths(), vec!["/v1/items"]);
    assert_eq!(
        app.app().blueprints,
        vec![(
            "items".to_string(),
            Some("v1_".to_string()),
            Some("/v1".to_string())
        )]
    );
}

#[test]
fn test_blueprint_without_url_prefix() {
    let (spec, mut app) = install(RecordingApp::default(), DocsConfig::new(true));
    let mut bp = app
        .register_blueprint("plain".to_string(), None, None)
        .unwrap();
    bp.route("/status", RouteOptions::new()).unwrap();
    assert_eq!(bp.into_registration(), "registered:plain");

    assert_eq!(spec.paths(), vec!["/status"]);
}

#[test]
fn test_blueprint_route_docs_and_options() {
    let (spec, mut app) = install(RecordingApp::default(), DocsConfig::new(false));
    let mut bp = app
        .register_blueprint("pets".to_string(), None, Some("/api"))
        .unwrap();
    bp.route(
        "/pets/{id}",
        RouteOptions::new()
            .methods(["DELETE"])
            .option("cors", true)
            .docs(Docs::new().summary("One pet").delete(Operation::new())),
    )
    .unwrap();

    assert_eq!(spec.summary("/api/pets/{id}").as_deref(), Some("One pet"));
    let (path, forwarded) = &app.app().routes[0];
    assert_eq!(path, "/api/pets/{id}");
    assert!(!forwarded.has_docs());
    assert_eq!(forwarded.get("cors"), Some(&serde_json::json!(true)));
}

#[test]
fn test_router_blueprint_end_to_end() {
    let (spec, mut app) = install(Router::new(), DocsConfig::new(true));

    let mut admin = Blueprint::new("admin");
    // declared before registration: registered under the prefix but not documented
    admin.route("/legacy", RouteOptions::new());

    let mut scope = app
        .register_blueprint(admin, None, Some("/admin"))
        .unwrap();
    assert_eq!(scope.registration().routes.len(), 1);
    scope
        .route("/users/{id}", RouteOptions::new().methods(["get", "put"]))
        .unwrap();

    assert_eq!(spec.paths(), vec!["/admin/users/{id}"]);
    assert!(spec
        .operation("/admin/users/{id}", "put")
        .unwrap()
        .get("requestBody")
        .is_some());

    let router = app.app();
    assert!(router.match_route(Method::GET, "/admin/legacy").is_some());
    let m = router.match_route(Method::PUT, "/admin/users/9").unwrap();
    assert_eq!(m.get_path_param("id"), Some("9"));
}

#[test]
fn test_framework_blueprint_error_is_propagated() {
    let (_spec, mut app) = install(Router::new(), DocsConfig::new(false));
    app.register_blueprint(Blueprint::new("dup"), None, None)
        .unwrap();

    let err = app
        .register_blueprint(Blueprint::new("dup"), None, Some("/two"))
        .unwrap_err();
    assert_eq!(
        err,
        RouteError::Framework(RouterError::DuplicateBlueprint {
            name: "dup".to_string()
        })
    );
}

#[test]
fn test_blueprint_scope_debug_shows_prefixes() {
    let (_spec, mut app) = install(Router::new(), DocsConfig::new(false));
    let scope = app
        .register_blueprint(Blueprint::new("admin"), Some("staff"), Some("/admin"))
        .unwrap();

    let rendered = format!("{scope:?}");
    assert!(rendered.starts_with("BlueprintRoutes"));
    assert!(rendered.contains("\"/admin\""));
    assert!(rendered.contains("Some(\"staff\")"));
}
