use super::core::path_to_regex;
use super::{Blueprint, Router, RouterError};
use crate::app::{Application, RouteOptions};
use crate::docs::Docs;
use http::Method;

#[test]
fn test_root_path() {
    let (re, params) = path_to_regex("/").unwrap();
    assert!(re.is_match("/"));
    assert!(params.is_empty());
}

#[test]
fn test_parameterized_path() {
    let (re, params) = path_to_regex("/items/{id}").unwrap();
    assert!(re.is_match("/items/123"));
    assert!(!re.is_match("/items/123/extra"));
    assert_eq!(params, vec!["id"]);
}

#[test]
fn test_literal_segments_are_escaped() {
    let (re, _) = path_to_regex("/files/a.b").unwrap();
    assert!(re.is_match("/files/a.b"));
    assert!(!re.is_match("/files/axb"));
}

#[test]
fn test_route_and_match() {
    let mut router = Router::new();
    let reg = router
        .route(
            "/pets/{id}",
            RouteOptions::new().methods(["get", "DELETE"]),
        )
        .unwrap();
    assert_eq!(reg.methods, vec![Method::GET, Method::DELETE]);
    assert_eq!(router.len(), 2);

    let m = router.match_route(Method::DELETE, "/pets/7").unwrap();
    assert_eq!(m.route.path, "/pets/{id}");
    assert_eq!(m.get_path_param("id"), Some("7"));
    assert!(router.match_route(Method::POST, "/pets/7").is_none());
}

#[test]
fn test_default_method_is_get() {
    let mut router = Router::new();
    let reg = router.route("/hello", RouteOptions::new()).unwrap();
    assert_eq!(reg.methods, vec![Method::GET]);
}

#[test]
fn test_repeated_method_in_one_declaration() {
    let mut router = Router::new();
    let reg = router
        .route("/x", RouteOptions::new().methods(["get", "GET"]))
        .unwrap();
    assert_eq!(reg.methods, vec![Method::GET]);
}

#[test]
fn test_duplicate_route_conflicts() {
    let mut router = Router::new();
    router.route("/x", RouteOptions::new()).unwrap();
    let err = router
        .route("/x", RouteOptions::new().methods(["post", "get"]))
        .unwrap_err();
    assert_eq!(
        err,
        RouterError::Conflict {
            method: "GET".to_string(),
            path: "/x".to_string()
        }
    );
    // the POST half of the failed declaration is not registered
    assert!(!router.has_route(&Method::POST, "/x"));
}

#[test]
fn test_relative_path_rejected() {
    let mut router = Router::new();
    let err = router.route("x", RouteOptions::new()).unwrap_err();
    assert!(matches!(err, RouterError::InvalidPath { .. }));
}

#[test]
fn test_unsupported_method_rejected() {
    let mut router = Router::new();
    let err = router
        .route("/x", RouteOptions::new().methods(["FETCH"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "unsupported HTTP method 'FETCH'"
    );
    assert!(router.is_empty());
}

#[test]
fn test_route_options_are_kept() {
    let mut router = Router::new();
    router
        .route("/x", RouteOptions::new().option("cors", true))
        .unwrap();
    let m = router.match_route(Method::GET, "/x").unwrap();
    assert_eq!(m.route.options["cors"], serde_json::json!(true));
}

#[test]
fn test_blueprint_replays_deferred_routes() {
    let mut bp = Blueprint::new("items");
    bp.route("/items", RouteOptions::new())
        .route("/items/{id}", RouteOptions::new().methods(["put"]));
    assert_eq!(bp.deferred_len(), 2);

    let mut router = Router::new();
    let reg = router.register_blueprint(bp, None, Some("/v1")).unwrap();
    assert_eq!(reg.name, "items");
    assert_eq!(reg.url_prefix, "/v1");
    assert_eq!(reg.routes.len(), 2);

    let m = router.match_route(Method::PUT, "/v1/items/3").unwrap();
    assert_eq!(m.route.blueprint.as_deref(), Some("items"));
    assert_eq!(router.blueprints(), ["items".to_string()]);
}

#[test]
fn test_blueprint_drops_docs_on_deferred_routes() {
    let mut bp = Blueprint::new("b");
    bp.route("/a", RouteOptions::new().docs(Docs::new()));
    let mut router = Router::new();
    router.register_blueprint(bp, Some("named"), None).unwrap();
    assert!(router.match_route(Method::GET, "/a").is_some());
    assert_eq!(router.blueprints(), ["named".to_string()]);
}

#[test]
fn test_duplicate_blueprint_name() {
    let mut router = Router::new();
    router
        .register_blueprint(Blueprint::new("b"), None, None)
        .unwrap();
    let err = router
        .register_blueprint(Blueprint::new("b"), None, Some("/v2"))
        .unwrap_err();
    assert_eq!(
        err,
        RouterError::DuplicateBlueprint {
            name: "b".to_string()
        }
    );
}

fn admin_blueprint() -> Blueprint {
    let mut bp = Blueprint::new("admin");
    bp.route("/a", RouteOptions::new())
        .route("/b", RouteOptions::new());
    bp
}

#[test]
fn test_blueprint_conflict_registers_nothing() {
    let mut router = Router::new();
    router.route("/admin/b", RouteOptions::new()).unwrap();

    let err = router
        .register_blueprint(admin_blueprint(), None, Some("/admin"))
        .unwrap_err();
    assert_eq!(
        err,
        RouterError::Conflict {
            method: "GET".to_string(),
            path: "/admin/b".to_string()
        }
    );
    assert!(router.match_route(Method::GET, "/admin/a").is_none());
    assert_eq!(router.len(), 1);
    assert!(router.blueprints().is_empty());

    let reg = router
        .register_blueprint(admin_blueprint(), None, Some("/staff"))
        .unwrap();
    assert_eq!(reg.routes.len(), 2);
    assert_eq!(router.len(), 3);
    assert_eq!(router.blueprints(), ["admin".to_string()]);
}

#[test]
fn test_blueprint_conflict_between_its_own_routes() {
    let mut bp = Blueprint::new("twice");
    bp.route("/same", RouteOptions::new().methods(["get", "post"]))
        .route("/same", RouteOptions::new().methods(["POST"]));

    let mut router = Router::new();
    let err = router.register_blueprint(bp, None, None).unwrap_err();
    assert_eq!(
        err,
        RouterError::Conflict {
            method: "POST".to_string(),
            path: "/same".to_string()
        }
    );
    assert!(router.is_empty());
    assert!(router.blueprints().is_empty());
}
