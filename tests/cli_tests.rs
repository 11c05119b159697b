#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::process::Command;

const MANIFEST: &str = r#"
title: CLI Demo
version: 1.0.0
routes:
  - path: /orders
    methods: [get, post]
  - path: /orders/{id}
    docs:
      summary: One order
      operations:
        get: { response: BaseModel }
"#;

fn manifest_in(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("routes.yaml");
    fs::write(&path, MANIFEST).unwrap();
    path
}

#[test]
fn test_cli_generate_writes_document() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = manifest_in(dir.path());
    let output = dir.path().join("openapi.json");

    let exe = env!("CARGO_BIN_EXE_routedoc");
    let status = Command::new(exe)
        .args(["generate", "--manifest"])
        .arg(&manifest)
        .arg("--output")
        .arg(&output)
        .arg("--default-docs")
        .env("ROUTEDOC_LOG_LEVEL", "error")
        .status()
        .unwrap();
    assert!(status.success());

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(doc["info"]["title"], "CLI Demo");
    assert!(doc["paths"]["/orders"]["post"]["requestBody"].is_object());
    assert!(doc["paths"]["/orders"]["get"].get("requestBody").is_none());
}

#[test]
fn test_cli_routes_lists_documented_operations() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = manifest_in(dir.path());

    let exe = env!("CARGO_BIN_EXE_routedoc");
    let out = Command::new(exe)
        .args(["routes", "--manifest"])
        .arg(&manifest)
        .env("ROUTEDOC_LOG_LEVEL", "error")
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["GET     /orders/{id}  One order"]);
}

#[test]
fn test_cli_routes_honours_default_docs_env() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = manifest_in(dir.path());

    let exe = env!("CARGO_BIN_EXE_routedoc");
    let out = Command::new(exe)
        .args(["routes", "--manifest"])
        .arg(&manifest)
        .env("ROUTEDOC_LOG_LEVEL", "error")
        .env("ROUTEDOC_GENERATE_DEFAULT_DOCS", "true")
        .env_remove("ROUTEDOC_CONFIG")
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "GET     /orders",
            "POST    /orders",
            "GET     /orders/{id}  One order",
        ]
    );
}

#[test]
fn test_cli_reports_bad_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("broken.yaml");
    fs::write(&manifest, "title: [unterminated\n").unwrap();

    let exe = env!("CARGO_BIN_EXE_routedoc");
    let out = Command::new(exe)
        .args(["generate", "--manifest"])
        .arg(&manifest)
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid manifest"));
}
