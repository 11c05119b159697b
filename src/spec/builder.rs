use super::options::SpecOptions;
use crate::error::DocError;
use crate::method::{is_openapi_method, normalize_method};
use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// OpenAPI version written when none is configured
pub const DEFAULT_OPENAPI_VERSION: &str = "3.1.0";

/// Documentation registered under one path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathEntry {
    /// Path-level summary
    pub summary: Option<String>,
    /// Operation objects keyed by lower-case method
    pub operations: BTreeMap<String, Value>,
}

pub(super) struct SpecState {
    pub(super) title: String,
    pub(super) version: String,
    pub(super) openapi_version: String,
    pub(super) description: Option<String>,
    pub(super) servers: Vec<String>,
    pub(super) options: SpecOptions,
    pub(super) paths: BTreeMap<String, PathEntry>,
    pub(super) schemas: BTreeMap<String, Value>,
}

/// Shared OpenAPI accumulator
///
/// Cloning yields another handle onto the same document.
#[derive(Clone)]
pub struct ApiSpec {
    inner: Arc<RwLock<SpecState>>,
}

impl fmt::Debug for ApiSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("ApiSpec")
            .field("title", &state.title)
            .field("version", &state.version)
            .field("openapi_version", &state.openapi_version)
            .field("paths", &state.paths.len())
            .field("schemas", &state.schemas.len())
            .field("options", &state.options)
            .finish()
    }
}

impl ApiSpec {
    /// Create an empty spec with the given `info.title` and `info.version`
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SpecState {
                title: title.into(),
                version: version.into(),
                openapi_version: DEFAULT_OPENAPI_VERSION.to_string(),
                description: None,
                servers: Vec::new(),
                options: SpecOptions::new(),
                paths: BTreeMap::new(),
                schemas: BTreeMap::new(),
            })),
        }
    }

    #[must_use]
    pub fn openapi_version(self, version: impl Into<String>) -> Self {
        self.write().openapi_version = version.into();
        self
    }

    #[must_use]
    pub fn description(self, description: impl Into<String>) -> Self {
        self.write().description = Some(description.into());
        self
    }

    /// Add a `servers` entry
    #[must_use]
    pub fn server(self, url: impl Into<String>) -> Self {
        self.write().servers.push(url.into());
        self
    }

    /// Attach an out-of-band option, e.g. the application under [`super::APP_OPTION`]
    #[must_use]
    pub fn with_option<T: Any + Send + Sync>(self, key: impl Into<String>, value: T) -> Self {
        self.insert_option(key, value);
        self
    }

    pub fn insert_option<T: Any + Send + Sync>(&self, key: impl Into<String>, value: T) {
        self.write().options.insert(key, value);
    }

    /// Remove and return an option; see [`SpecOptions::take`]
    pub fn take_option<T: Any + Send + Sync>(&self, key: &str) -> Result<Option<T>, DocError> {
        self.write().options.take(key)
    }

    #[must_use]
    pub fn has_option(&self, key: &str) -> bool {
        self.read().options.contains(key)
    }

    /// Register operations under `path`
    ///
    /// Operations for a path that is already known are merged in, replacing
    /// existing entries for the same method. A provided `summary` replaces the
    /// stored one; `None` leaves it untouched.
    ///
    /// # Errors
    ///
    /// - [`DocError::InvalidPath`] if `path` does not start with `/`
    /// - [`DocError::InvalidMethod`] if an operation key is not an OpenAPI verb
    ///
    /// Nothing is written when an error is returned.
    pub fn path(
        &self,
        path: &str,
        operations: BTreeMap<String, Value>,
        summary: Option<&str>,
    ) -> Result<(), DocError> {
        check_path(path, operations.keys().map(String::as_str))?;

        let mut state = self.write();
        let entry = state.paths.entry(path.to_string()).or_default();
        if let Some(summary) = summary {
            entry.summary = Some(summary.to_string());
        }
        let methods: Vec<String> = operations.keys().map(|m| normalize_method(m)).collect();
        for (method, operation) in operations {
            entry.operations.insert(normalize_method(&method), operation);
        }

        info!(
            path = %path,
            methods = ?methods,
            total_paths = state.paths.len(),
            "Path documented"
        );
        Ok(())
    }

    /// Register a component schema
    ///
    /// Re-registering an identical schema is a no-op.
    ///
    /// # Errors
    ///
    /// [`DocError::SchemaConflict`] if `name` is taken by a different schema.
    pub fn component_schema(&self, name: &str, schema: Value) -> Result<(), DocError> {
        let mut state = self.write();
        match state.schemas.get(name) {
            Some(existing) if *existing == schema => Ok(()),
            Some(_) => Err(DocError::SchemaConflict {
                name: name.to_string(),
            }),
            None => {
                debug!(schema = %name, "Component schema registered");
                state.schemas.insert(name.to_string(), schema);
                Ok(())
            }
        }
    }

    /// Check that `schema` could be registered under `name` without writing it
    ///
    /// # Errors
    ///
    /// [`DocError::SchemaConflict`] if `name` is taken by a different schema.
    pub fn check_component_schema(&self, name: &str, schema: &Value) -> Result<(), DocError> {
        match self.read().schemas.get(name) {
            Some(existing) if existing != schema => Err(DocError::SchemaConflict {
                name: name.to_string(),
            }),
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn title(&self) -> String {
        self.read().title.clone()
    }

    #[must_use]
    pub fn version(&self) -> String {
        self.read().version.clone()
    }

    /// All documented paths in sorted order
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.read().paths.keys().cloned().collect()
    }

    #[must_use]
    pub fn path_entry(&self, path: &str) -> Option<PathEntry> {
        self.read().paths.get(path).cloned()
    }

    #[must_use]
    pub fn operations(&self, path: &str) -> Option<BTreeMap<String, Value>> {
        self.read().paths.get(path).map(|e| e.operations.clone())
    }

    #[must_use]
    pub fn operation(&self, path: &str, method: &str) -> Option<Value> {
        self.read()
            .paths
            .get(path)
            .and_then(|e| e.operations.get(&normalize_method(method)).cloned())
    }

    #[must_use]
    pub fn summary(&self, path: &str) -> Option<String> {
        self.read().paths.get(path).and_then(|e| e.summary.clone())
    }

    #[must_use]
    pub fn schemas(&self) -> BTreeMap<String, Value> {
        self.read().schemas.clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().paths.is_empty()
    }

    pub(super) fn read(&self) -> RwLockReadGuard<'_, SpecState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SpecState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Validate a path and its operation keys the way [`ApiSpec::path`] does
///
/// # Errors
///
/// - [`DocError::InvalidPath`] if `path` does not start with `/`
/// - [`DocError::InvalidMethod`] if a key is not an OpenAPI verb
pub fn check_path<'a>(
    path: &str,
    mut methods: impl Iterator<Item = &'a str>,
) -> Result<(), DocError> {
    if !path.starts_with('/') {
        return Err(DocError::InvalidPath {
            path: path.to_string(),
        });
    }
    if let Some(bad) = methods.find(|m| !is_openapi_method(m)) {
        return Err(DocError::InvalidMethod {
            path: path.to_string(),
            method: bad.to_string(),
        });
    }
    Ok(())
}
