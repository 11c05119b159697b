//! Request/response models as OpenAPI component schemas.
//!
//! A model is anything that can describe itself as a named JSON Schema.
//! Types implement [`ApiModel`]; descriptors carry the resulting
//! [`ModelSchema`] values so that models defined at runtime (for instance
//! from a manifest file) work the same as compiled ones.

use crate::error::DocError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

/// Component names allowed by OpenAPI 3 (`components.schemas` keys)
static COMPONENT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid component name regex"));

/// Prefix of every schema reference emitted by this crate
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// A type with a JSON Schema representation
///
/// ```
/// use routedoc::schema::{ApiModel, ModelSchema};
/// use serde_json::json;
///
/// struct Pet;
///
/// impl ApiModel for Pet {
///     fn model_name() -> String {
///         "Pet".into()
///     }
///
///     fn json_schema() -> serde_json::Value {
///         json!({"type": "object", "properties": {"name": {"type": "string"}}})
///     }
/// }
///
/// let schema = ModelSchema::of::<Pet>();
/// assert_eq!(schema.name(), "Pet");
/// ```
pub trait ApiModel {
    /// Name used as the component key
    fn model_name() -> String;

    /// JSON Schema of the model
    fn json_schema() -> Value;
}

/// The empty placeholder model used for synthesized documentation
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseModel;

impl ApiModel for BaseModel {
    fn model_name() -> String {
        "BaseModel".to_string()
    }

    fn json_schema() -> Value {
        json!({
            "title": "BaseModel",
            "type": "object",
            "properties": {}
        })
    }
}

/// A named schema ready to be registered as a component
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSchema {
    name: String,
    schema: Value,
}

impl ModelSchema {
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    /// Schema of a compiled model
    #[must_use]
    pub fn of<M: ApiModel>() -> Self {
        Self::new(M::model_name(), M::json_schema())
    }

    /// Schema of [`BaseModel`]
    #[must_use]
    pub fn base_model() -> Self {
        Self::of::<BaseModel>()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// `{"$ref": "#/components/schemas/<name>"}`
    #[must_use]
    pub fn reference(&self) -> Value {
        json!({ "$ref": format!("{SCHEMA_REF_PREFIX}{}", self.name) })
    }

    /// Check the schema can be emitted as a component
    pub fn validate(&self) -> Result<(), DocError> {
        if !COMPONENT_NAME.is_match(&self.name) {
            return Err(DocError::InvalidSchema {
                name: self.name.clone(),
                reason: "component names may only contain letters, digits, '.', '-' and '_'"
                    .to_string(),
            });
        }
        match &self.schema {
            Value::Object(_) => Ok(()),
            other => Err(DocError::InvalidSchema {
                name: self.name.clone(),
                reason: format!("expected a JSON object, found {}", kind(other)),
            }),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_model_reference() {
        let base = ModelSchema::base_model();
        assert_eq!(base.name(), "BaseModel");
        assert_eq!(
            base.reference(),
            json!({"$ref": "#/components/schemas/BaseModel"})
        );
        assert!(base.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_component_name() {
        let err = ModelSchema::new("Pet Store", json!({})).validate().unwrap_err();
        assert!(matches!(err, DocError::InvalidSchema { ref name, .. } if name == "Pet Store"));
    }

    #[test]
    fn test_rejects_non_object_schema() {
        let err = ModelSchema::new("Pet", json!("object")).validate().unwrap_err();
        assert!(err.to_string().contains("found string"));
        assert!(ModelSchema::new("Any", json!(true)).validate().is_err());
    }
}
