//! # Route Manifest
//!
//! A YAML or JSON file that declares an application's routes, blueprints and
//! models. [`Manifest::build`] replays every declaration through a
//! [`DocumentedApp`] wrapping a [`Router`], so the resulting spec is exactly
//! what the interceptor records for the same declarations made in code.
//!
//! ```yaml
//! title: Pet Store
//! version: 1.0.0
//! generate_default_docs: false
//! schemas:
//!   Pet:
//!     type: object
//!     properties:
//!       name: { type: string }
//! routes:
//!   - path: /pets
//!     methods: [GET, POST]
//!     docs:
//!       summary: Pets
//!       operations:
//!         get: { response: Pet }
//!         post: { request: Pet, response: Pet }
//! blueprints:
//!   - name: admin
//!     url_prefix: /admin
//!     routes:
//!       - path: /stats
//! ```
//!
//! Schema names used in `docs` must be declared under `schemas`, except for
//! `BaseModel` which is always available.

use crate::app::RouteOptions;
use crate::config::DocsConfig;
use crate::docs::{Docs, Operation, Response};
use crate::plugin::{DocsPlugin, DocumentedApp};
use crate::router::{Blueprint, Router};
use crate::schema::ModelSchema;
use crate::spec::{ApiSpec, APP_OPTION};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Top-level manifest document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<String>,
    /// Overrides [`DocsConfig::generate_default_docs`] when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_default_docs: Option<bool>,
    /// Named JSON schemas referenced from route docs
    #[serde(default)]
    pub schemas: BTreeMap<String, Value>,
    #[serde(default)]
    pub routes: Vec<RouteDecl>,
    #[serde(default)]
    pub blueprints: Vec<BlueprintDecl>,
}

/// One route declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteDecl {
    pub path: String,
    /// Declared methods; the framework default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<DocsDecl>,
    /// Framework options forwarded untouched
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, Value>,
}

/// Route documentation with schemas referenced by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocsDecl {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub content_types: Vec<String>,
    /// Keyed by method, any case
    #[serde(default)]
    pub operations: BTreeMap<String, OperationDecl>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationDecl {
    #[serde(default)]
    pub request: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub content_types: Vec<String>,
    /// Responses beyond the 200 success response
    #[serde(default)]
    pub responses: Vec<ResponseDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseDecl {
    pub status: u16,
    pub description: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// A blueprint and the routes declared on it after registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlueprintDecl {
    pub name: String,
    #[serde(default)]
    pub name_prefix: Option<String>,
    #[serde(default)]
    pub url_prefix: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteDecl>,
}

impl Manifest {
    /// Load a manifest, choosing YAML or JSON by file extension
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        Self::parse(&content, is_yaml)
            .with_context(|| format!("invalid manifest {}", path.display()))
    }

    pub fn parse(content: &str, is_yaml: bool) -> anyhow::Result<Self> {
        let manifest = if is_yaml {
            serde_yaml::from_str(content)?
        } else {
            serde_json::from_str(content)?
        };
        Ok(manifest)
    }

    /// Number of route declarations, including blueprint routes
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
            + self
                .blueprints
                .iter()
                .map(|bp| bp.routes.len())
                .sum::<usize>()
    }

    /// Replay every declaration through a documented [`Router`]
    ///
    /// Declared schemas are registered as components first, then top-level
    /// routes, then blueprints in declaration order.
    pub fn build(&self, config: &DocsConfig) -> anyhow::Result<DocumentedApp<Router>> {
        let mut config = config.clone();
        if let Some(flag) = self.generate_default_docs {
            config.generate_default_docs = flag;
        }

        let mut spec = ApiSpec::new(&self.title, &self.version);
        if let Some(description) = &self.description {
            spec = spec.description(description);
        }
        for server in &self.servers {
            spec = spec.server(server);
        }
        let spec = spec.with_option(APP_OPTION, Router::new());

        let models = self.models()?;
        for (name, model) in &models {
            if self.schemas.contains_key(name) {
                spec.component_schema(name, model.schema().clone())?;
            }
        }

        let mut app = DocsPlugin::with_config(config).install::<Router>(&spec)?;

        for decl in &self.routes {
            let options = decl.to_options(&models)?;
            app.route(&decl.path, options)
                .with_context(|| format!("failed to register route {}", decl.path))?;
        }

        for bp in &self.blueprints {
            let mut scope = app
                .register_blueprint(
                    Blueprint::new(&bp.name),
                    bp.name_prefix.as_deref(),
                    bp.url_prefix.as_deref(),
                )
                .with_context(|| format!("failed to register blueprint {}", bp.name))?;
            for decl in &bp.routes {
                let options = decl.to_options(&models)?;
                scope.route(&decl.path, options).with_context(|| {
                    format!("failed to register route {} on blueprint {}", decl.path, bp.name)
                })?;
            }
        }

        info!(
            title = %self.title,
            routes = self.route_count(),
            documented_paths = app.spec().paths().len(),
            "Manifest built"
        );
        Ok(app)
    }

    fn models(&self) -> anyhow::Result<BTreeMap<String, ModelSchema>> {
        let mut models = BTreeMap::new();
        let base = ModelSchema::base_model();
        models.insert(base.name().to_string(), base);
        for (name, schema) in &self.schemas {
            let model = ModelSchema::new(name, schema.clone());
            model.validate()?;
            models.insert(name.clone(), model);
        }
        Ok(models)
    }
}

impl RouteDecl {
    fn to_options(&self, models: &BTreeMap<String, ModelSchema>) -> anyhow::Result<RouteOptions> {
        let mut options = RouteOptions::new();
        if let Some(methods) = &self.methods {
            options = options.methods(methods.iter().map(String::as_str));
        }
        for (key, value) in &self.options {
            options = options.option(key.as_str(), value.clone());
        }
        if let Some(docs) = &self.docs {
            let docs = docs
                .to_docs(models)
                .with_context(|| format!("invalid docs for route {}", self.path))?;
            options = options.docs(docs);
        }
        Ok(options)
    }
}

impl DocsDecl {
    fn to_docs(&self, models: &BTreeMap<String, ModelSchema>) -> anyhow::Result<Docs> {
        let mut docs = Docs::new();
        if let Some(summary) = &self.summary {
            docs = docs.summary(summary);
        }
        for tag in &self.tags {
            docs = docs.tag(tag);
        }
        for content_type in &self.content_types {
            docs = docs.content_type(content_type);
        }
        for (method, decl) in &self.operations {
            docs = docs.operation(method, decl.to_operation(models)?);
        }
        Ok(docs)
    }
}

impl OperationDecl {
    fn to_operation(&self, models: &BTreeMap<String, ModelSchema>) -> anyhow::Result<Operation> {
        let mut op = Operation::new().deprecated(self.deprecated);
        if let Some(name) = &self.request {
            op = op.request(lookup(models, name)?);
        }
        if let Some(name) = &self.response {
            op = op.response(lookup(models, name)?);
        }
        if let Some(summary) = &self.summary {
            op = op.summary(summary);
        }
        if let Some(description) = &self.description {
            op = op.description(description);
        }
        if let Some(id) = &self.operation_id {
            op = op.operation_id(id);
        }
        for tag in &self.tags {
            op = op.tag(tag);
        }
        for content_type in &self.content_types {
            op = op.content_type(content_type);
        }
        for response in &self.responses {
            let mut extra = Response::new(response.status, &response.description);
            if let Some(name) = &response.model {
                extra = extra.model(lookup(models, name)?);
            }
            op = op.with_response(extra);
        }
        Ok(op)
    }
}

fn lookup(models: &BTreeMap<String, ModelSchema>, name: &str) -> anyhow::Result<ModelSchema> {
    models
        .get(name)
        .cloned()
        .ok_or_else(|| anyhow!("unknown schema '{name}'; declare it under `schemas`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use serde_json::json;

    const PETS: &str = r#"
title: Pet Store
version: 1.0.0
schemas:
  Pet:
    type: object
    properties:
      name: { type: string }
routes:
  - path: /pets
    methods: [GET, post]
    options:
      cors: true
    docs:
      summary: Pets
      operations:
        GET: { response: Pet }
        post:
          request: Pet
          response: Pet
          responses:
            - { status: 422, description: Invalid pet }
  - path: /health
blueprints:
  - name: admin
    url_prefix: /admin
    routes:
      - path: /stats
        docs:
          operations:
            get: { response: BaseModel }
"#;

    #[test]
    fn test_parse_yaml() {
        let manifest = Manifest::parse(PETS, true).unwrap();
        assert_eq!(manifest.title, "Pet Store");
        assert_eq!(manifest.routes.len(), 2);
        assert_eq!(manifest.route_count(), 3);
        assert_eq!(manifest.routes[0].options["cors"], json!(true));
    }

    #[test]
    fn test_build_documents_routes() {
        let app = Manifest::parse(PETS, true)
            .unwrap()
            .build(&DocsConfig::default())
            .unwrap();
        let spec = app.spec();

        assert_eq!(spec.paths(), vec!["/admin/stats", "/pets"]);
        assert_eq!(spec.summary("/pets").as_deref(), Some("Pets"));
        let post = spec.operation("/pets", "post").unwrap();
        assert_eq!(
            post["requestBody"]["content"]["application/json"]["schema"],
            json!({"$ref": "#/components/schemas/Pet"})
        );
        assert_eq!(post["responses"]["422"]["description"], json!("Invalid pet"));
        assert!(spec.schemas().contains_key("Pet"));

        // undocumented route is still registered with the framework
        assert!(app.app().match_route(Method::GET, "/health").is_some());
        assert!(app.app().match_route(Method::GET, "/admin/stats").is_some());
    }

    #[test]
    fn test_manifest_flag_overrides_config() {
        let mut manifest = Manifest::parse(PETS, true).unwrap();
        manifest.generate_default_docs = Some(true);
        let app = manifest.build(&DocsConfig::default()).unwrap();
        assert!(app.spec().operation("/health", "get").is_some());
    }

    #[test]
    fn test_unknown_schema_is_an_error() {
        let json = r#"{
            "title": "T", "version": "1",
            "routes": [{"path": "/x", "docs": {"operations": {"get": {"response": "Nope"}}}}]
        }"#;
        let err = Manifest::parse(json, false)
            .unwrap()
            .build(&DocsConfig::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("unknown schema 'Nope'"));
    }

    #[test]
    fn test_unknown_top_level_key_is_rejected() {
        assert!(Manifest::parse("title: T\nversion: '1'\nroutez: []\n", true).is_err());
    }

    #[test]
    fn test_load_by_extension() {
        let file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        std::fs::write(file.path(), PETS).unwrap();
        let manifest = Manifest::load(file.path()).unwrap();
        assert_eq!(manifest.blueprints[0].name, "admin");
    }
}
