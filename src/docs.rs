//! # Documentation Descriptors
//!
//! A [`Docs`] value is attached to a route declaration and says, per HTTP
//! method, which model the request body and the response carry. It lives only
//! for the duration of the registration call: the interceptor converts it into
//! OpenAPI operation objects with [`Docs::build_operations`] and drops it.
//!
//! ```rust
//! use routedoc::docs::{Docs, Operation};
//! use routedoc::schema::ModelSchema;
//! use routedoc::spec::ApiSpec;
//! use serde_json::json;
//!
//! let pet = ModelSchema::new("Pet", json!({"type": "object"}));
//! let docs = Docs::new()
//!     .summary("Pets")
//!     .post(Operation::new().request(pet.clone()).response(pet));
//!
//! let spec = ApiSpec::new("Pet Store", "1.0.0");
//! let ops = docs.build_operations(&spec, &["post".to_string()]).unwrap();
//! assert_eq!(
//!     ops["post"]["requestBody"]["content"]["application/json"]["schema"]["$ref"],
//!     "#/components/schemas/Pet"
//! );
//! ```

use crate::error::DocError;
use crate::method::normalize_method;
use crate::schema::ModelSchema;
use crate::spec::ApiSpec;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Content type used when neither the operation nor the descriptor names one
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Description of the primary (200) response
pub const SUCCESS_DESCRIPTION: &str = "Success";

/// An additional documented response
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub description: String,
    pub model: Option<ModelSchema>,
}

impl Response {
    pub fn new(status: u16, description: impl Into<String>) -> Self {
        Self {
            status,
            description: description.into(),
            model: None,
        }
    }

    #[must_use]
    pub fn model(mut self, model: ModelSchema) -> Self {
        self.model = Some(model);
        self
    }
}

/// Documentation for one HTTP method on a path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operation {
    pub request: Option<ModelSchema>,
    pub response: Option<ModelSchema>,
    pub responses: Vec<Response>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub operation_id: Option<String>,
    pub deprecated: bool,
    pub content_types: Vec<String>,
}

impl Operation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn request(mut self, model: ModelSchema) -> Self {
        self.request = Some(model);
        self
    }

    #[must_use]
    pub fn response(mut self, model: ModelSchema) -> Self {
        self.response = Some(model);
        self
    }

    /// Document a further status code
    #[must_use]
    pub fn with_response(mut self, response: Response) -> Self {
        self.responses.push(response);
        self
    }

    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Request content type; may be given several times
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_types.push(content_type.into());
        self
    }

    /// Models referenced by the request, the primary response and extra responses
    fn models(&self) -> impl Iterator<Item = &ModelSchema> {
        self.request
            .iter()
            .chain(self.response.iter())
            .chain(self.responses.iter().filter_map(|r| r.model.as_ref()))
    }

    /// Build the OpenAPI operation object; referenced models must already be registered
    fn to_openapi(&self, defaults: &Docs) -> Value {
        let mut op = Map::new();

        let tags = if self.tags.is_empty() {
            &defaults.tags
        } else {
            &self.tags
        };
        if !tags.is_empty() {
            op.insert("tags".into(), json!(tags));
        }
        if let Some(summary) = &self.summary {
            op.insert("summary".into(), json!(summary));
        }
        if let Some(description) = &self.description {
            op.insert("description".into(), json!(description));
        }
        if let Some(id) = &self.operation_id {
            op.insert("operationId".into(), json!(id));
        }
        if self.deprecated {
            op.insert("deprecated".into(), Value::Bool(true));
        }

        if let Some(model) = &self.request {
            let content_types = self.effective_content_types(defaults);
            let content: Map<String, Value> = content_types
                .iter()
                .map(|ct| (ct.clone(), json!({ "schema": model.reference() })))
                .collect();
            op.insert(
                "requestBody".into(),
                json!({ "required": true, "content": content }),
            );
        }

        let mut responses = Map::new();
        let mut primary = Map::new();
        primary.insert("description".into(), json!(SUCCESS_DESCRIPTION));
        if let Some(model) = &self.response {
            primary.insert(
                "content".into(),
                json!({ DEFAULT_CONTENT_TYPE: { "schema": model.reference() } }),
            );
        }
        responses.insert("200".into(), Value::Object(primary));

        for extra in &self.responses {
            let mut response = Map::new();
            response.insert("description".into(), json!(extra.description));
            if let Some(model) = &extra.model {
                response.insert(
                    "content".into(),
                    json!({ DEFAULT_CONTENT_TYPE: { "schema": model.reference() } }),
                );
            }
            responses.insert(extra.status.to_string(), Value::Object(response));
        }
        op.insert("responses".into(), Value::Object(responses));

        Value::Object(op)
    }

    fn effective_content_types(&self, defaults: &Docs) -> Vec<String> {
        if !self.content_types.is_empty() {
            self.content_types.clone()
        } else if !defaults.content_types.is_empty() {
            defaults.content_types.clone()
        } else {
            vec![DEFAULT_CONTENT_TYPE.to_string()]
        }
    }
}

/// Validate every model and check it against `spec` and against the others
fn check_models<'a>(
    spec: &ApiSpec,
    models: impl Iterator<Item = &'a ModelSchema>,
) -> Result<Vec<&'a ModelSchema>, DocError> {
    let mut pending: BTreeMap<&str, &ModelSchema> = BTreeMap::new();
    for model in models {
        model.validate()?;
        spec.check_component_schema(model.name(), model.schema())?;
        match pending.get(model.name()) {
            Some(seen) if seen.schema() != model.schema() => {
                return Err(DocError::SchemaConflict {
                    name: model.name().to_string(),
                })
            }
            Some(_) => {}
            None => {
                pending.insert(model.name(), model);
            }
        }
    }
    Ok(pending.into_values().collect())
}

/// Per-method documentation attached to a route
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Docs {
    operations: BTreeMap<String, Operation>,
    summary: Option<String>,
    tags: Vec<String>,
    content_types: Vec<String>,
}

impl Docs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the operation for `method` (any case)
    #[must_use]
    pub fn operation(mut self, method: &str, operation: Operation) -> Self {
        self.operations.insert(normalize_method(method), operation);
        self
    }

    #[must_use]
    pub fn get(self, operation: Operation) -> Self {
        self.operation("get", operation)
    }

    #[must_use]
    pub fn post(self, operation: Operation) -> Self {
        self.operation("post", operation)
    }

    #[must_use]
    pub fn put(self, operation: Operation) -> Self {
        self.operation("put", operation)
    }

    #[must_use]
    pub fn patch(self, operation: Operation) -> Self {
        self.operation("patch", operation)
    }

    #[must_use]
    pub fn delete(self, operation: Operation) -> Self {
        self.operation("delete", operation)
    }

    #[must_use]
    pub fn head(self, operation: Operation) -> Self {
        self.operation("head", operation)
    }

    #[must_use]
    pub fn options(self, operation: Operation) -> Self {
        self.operation("options", operation)
    }

    /// Path-level summary written next to the operations
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Tag applied to every operation that declares none of its own
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Request content type for operations that declare none of their own
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_types.push(content_type.into());
        self
    }

    #[must_use]
    pub fn get_summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    #[must_use]
    pub fn get_operation(&self, method: &str) -> Option<&Operation> {
        self.operations.get(&normalize_method(method))
    }

    /// Lower-case methods that have an operation
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Convert to OpenAPI operation objects for `methods`
    ///
    /// Models referenced by the converted operations are registered as
    /// component schemas on `spec`. Nothing is registered unless every
    /// operation converts. Operations for methods not in `methods` are ignored.
    ///
    /// # Errors
    ///
    /// - [`DocError::MissingOperation`] if a method has no operation
    /// - [`DocError::InvalidSchema`] / [`DocError::SchemaConflict`] for unusable models
    pub fn build_operations(
        &self,
        spec: &ApiSpec,
        methods: &[String],
    ) -> Result<BTreeMap<String, Value>, DocError> {
        let mut selected = Vec::with_capacity(methods.len());
        for method in methods {
            let method = normalize_method(method);
            let operation =
                self.operations
                    .get(&method)
                    .ok_or_else(|| DocError::MissingOperation {
                        method: method.clone(),
                    })?;
            selected.push((method, operation));
        }

        let models = check_models(spec, selected.iter().flat_map(|&(_, op)| op.models()))?;
        for model in models {
            spec.component_schema(model.name(), model.schema().clone())?;
        }

        Ok(selected
            .into_iter()
            .map(|(method, operation)| (method, operation.to_openapi(self)))
            .collect())
    }
}
