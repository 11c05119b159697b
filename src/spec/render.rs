use super::builder::ApiSpec;
use crate::error::DocError;
use anyhow::Context;
use oas3::OpenApiV3Spec;
use serde_json::{json, Map, Value};
use std::path::Path;

/// Serialization format of the rendered document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl OutputFormat {
    /// `.yaml`/`.yml` select YAML, anything else JSON
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => OutputFormat::Yaml,
            _ => OutputFormat::Json,
        }
    }
}

impl ApiSpec {
    /// The accumulated document as a JSON value
    #[must_use]
    pub fn to_value(&self) -> Value {
        let state = self.read();

        let mut info = Map::new();
        info.insert("title".into(), Value::String(state.title.clone()));
        info.insert("version".into(), Value::String(state.version.clone()));
        if let Some(description) = &state.description {
            info.insert("description".into(), Value::String(description.clone()));
        }

        let mut paths = Map::new();
        for (path, entry) in &state.paths {
            let mut item = Map::new();
            if let Some(summary) = &entry.summary {
                item.insert("summary".into(), Value::String(summary.clone()));
            }
            for (method, operation) in &entry.operations {
                item.insert(method.clone(), operation.clone());
            }
            paths.insert(path.clone(), Value::Object(item));
        }

        let mut doc = Map::new();
        doc.insert(
            "openapi".into(),
            Value::String(state.openapi_version.clone()),
        );
        doc.insert("info".into(), Value::Object(info));
        if !state.servers.is_empty() {
            let servers = state
                .servers
                .iter()
                .map(|url| json!({ "url": url }))
                .collect();
            doc.insert("servers".into(), Value::Array(servers));
        }
        doc.insert("paths".into(), Value::Object(paths));
        if !state.schemas.is_empty() {
            let schemas: Map<String, Value> = state
                .schemas
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            doc.insert("components".into(), json!({ "schemas": schemas }));
        }
        Value::Object(doc)
    }

    pub fn to_json(&self) -> Result<String, DocError> {
        serde_json::to_string_pretty(&self.to_value()).map_err(|e| DocError::Render {
            message: e.to_string(),
        })
    }

    pub fn to_yaml(&self) -> Result<String, DocError> {
        serde_yaml::to_string(&self.to_value()).map_err(|e| DocError::Render {
            message: e.to_string(),
        })
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, DocError> {
        match format {
            OutputFormat::Json => self.to_json(),
            OutputFormat::Yaml => self.to_yaml(),
        }
    }

    /// Parse the document into the typed `oas3` model
    ///
    /// Fails when the accumulated operations do not form a valid OpenAPI
    /// document (for example a hand-written operation missing `responses`
    /// descriptions).
    pub fn to_openapi(&self) -> Result<OpenApiV3Spec, DocError> {
        serde_json::from_value(self.to_value()).map_err(|e| DocError::Render {
            message: e.to_string(),
        })
    }

    /// Write the document to `path`, format chosen from the extension
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        self.write_as(path, OutputFormat::from_path(path))
    }

    /// Write the document to `path` in `format`, whatever the extension
    pub fn write_as(&self, path: &Path, format: OutputFormat) -> anyhow::Result<()> {
        let rendered = self.render(format)?;
        std::fs::write(path, rendered)
            .with_context(|| format!("failed to write OpenAPI document to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample() -> ApiSpec {
        let spec = ApiSpec::new("Pet Store", "2.0.0")
            .description("Pets")
            .server("https://api.example.com/v1");
        spec.component_schema("Pet", json!({"type": "object"})).unwrap();
        spec.path(
            "/pets",
            BTreeMap::from([(
                "get".to_string(),
                json!({"responses": {"200": {"description": "Success"}}}),
            )]),
            Some("All pets"),
        )
        .unwrap();
        spec
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("a.YML")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_path(Path::new("a.yaml")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_path(Path::new("a.json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(Path::new("openapi")), OutputFormat::Json);
    }

    #[test]
    fn test_to_value_layout() {
        let doc = sample().to_value();
        assert_eq!(doc["openapi"], "3.1.0");
        assert_eq!(doc["info"]["title"], "Pet Store");
        assert_eq!(doc["info"]["description"], "Pets");
        assert_eq!(doc["servers"][0]["url"], "https://api.example.com/v1");
        assert_eq!(doc["paths"]["/pets"]["summary"], "All pets");
        assert!(doc["paths"]["/pets"]["get"]["responses"]["200"].is_object());
        assert_eq!(doc["components"]["schemas"]["Pet"]["type"], "object");
    }

    #[test]
    fn test_empty_spec_has_no_components() {
        let doc = ApiSpec::new("Empty", "0.1.0").to_value();
        assert!(doc.get("components").is_none());
        assert!(doc.get("servers").is_none());
        assert_eq!(doc["paths"], json!({}));
    }

    #[test]
    fn test_yaml_and_json_agree() {
        let spec = sample();
        let from_json: Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();
        let from_yaml: Value = serde_yaml::from_str(&spec.to_yaml().unwrap()).unwrap();
        assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn test_to_openapi_parses() {
        let typed = sample().to_openapi().unwrap();
        assert_eq!(typed.info.title, "Pet Store");
        assert!(typed.paths.as_ref().is_some_and(|p| p.contains_key("/pets")));
    }
}
