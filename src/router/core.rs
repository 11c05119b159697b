//! Router core module - route table and request matching.

use super::blueprint::{Blueprint, BlueprintRegistration};
use super::error::RouterError;
use crate::app::{Application, RouteOptions};
use http::Method;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Methods the router dispatches
pub const SUPPORTED_METHODS: [Method; 8] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
    Method::HEAD,
    Method::TRACE,
];

/// One (method, path) binding in the routing table
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    pub method: Method,
    /// Full path pattern, e.g. `/v1/pets/{id}`
    pub path: String,
    /// Framework options the route was declared with
    pub options: BTreeMap<String, Value>,
    /// Name of the blueprint that declared the route, if any
    pub blueprint: Option<String>,
}

/// Result of route registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRegistration {
    pub path: String,
    pub methods: Vec<Method>,
}

/// Result of successfully matching a request path to a route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub route: Arc<RouteEntry>,
    /// Path parameters in declaration order (e.g., `{id}` → `("id", "123")`)
    pub path_params: Vec<(String, String)>,
}

impl RouteMatch {
    /// Get a path parameter by name
    ///
    /// Uses "last write wins" semantics: if duplicate parameter names exist
    /// at different path depths, returns the last occurrence.
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

struct CompiledRoute {
    regex: Regex,
    param_names: Vec<String>,
    entry: Arc<RouteEntry>,
}

/// In-process route table implementing [`Application`]
///
/// Routes are matched in registration order against regexes compiled from
/// their `{param}` patterns.
#[derive(Default)]
pub struct Router {
    routes: Vec<CompiledRoute>,
    blueprints: Vec<String>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.len())
            .field("blueprints", &self.blueprints)
            .finish()
    }
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` for every declared method
    ///
    /// All methods are checked before anything is inserted, so a failed call
    /// leaves the table unchanged.
    pub fn add_route(
        &mut self,
        path: &str,
        options: &RouteOptions,
        blueprint: Option<&str>,
    ) -> Result<RouteRegistration, RouterError> {
        let compiled = self.compile_route(path, options, blueprint, &[])?;
        Ok(self.commit(compiled, path, blueprint))
    }

    /// Build table entries for `path` without inserting them
    ///
    /// `pending` holds entries compiled earlier in the same batch; a
    /// (method, path) pair in the table or in `pending` is a conflict.
    fn compile_route(
        &self,
        path: &str,
        options: &RouteOptions,
        blueprint: Option<&str>,
        pending: &[CompiledRoute],
    ) -> Result<Vec<CompiledRoute>, RouterError> {
        if !path.starts_with('/') {
            return Err(RouterError::InvalidPath {
                path: path.to_string(),
            });
        }

        let mut methods: Vec<Method> = Vec::new();
        for declared in options.method_list() {
            let method = parse_method(&declared)?;
            if methods.contains(&method) {
                continue;
            }
            let queued = pending
                .iter()
                .any(|r| r.entry.method == method && r.entry.path == path);
            if queued || self.has_route(&method, path) {
                return Err(RouterError::Conflict {
                    method: method.to_string(),
                    path: path.to_string(),
                });
            }
            methods.push(method);
        }

        let (regex, param_names) = path_to_regex(path).map_err(|_| RouterError::InvalidPath {
            path: path.to_string(),
        })?;
        Ok(methods
            .into_iter()
            .map(|method| CompiledRoute {
                regex: regex.clone(),
                param_names: param_names.clone(),
                entry: Arc::new(RouteEntry {
                    method,
                    path: path.to_string(),
                    options: options.extra().clone(),
                    blueprint: blueprint.map(str::to_string),
                }),
            })
            .collect())
    }

    fn commit(
        &mut self,
        compiled: Vec<CompiledRoute>,
        path: &str,
        blueprint: Option<&str>,
    ) -> RouteRegistration {
        let methods: Vec<Method> = compiled.iter().map(|r| r.entry.method.clone()).collect();
        self.routes.extend(compiled);

        info!(
            path = %path,
            methods = ?methods,
            blueprint = ?blueprint,
            routes_count = self.routes.len(),
            "Route registered"
        );

        RouteRegistration {
            path: path.to_string(),
            methods,
        }
    }

    #[must_use]
    pub fn has_route(&self, method: &Method, path: &str) -> bool {
        self.routes
            .iter()
            .any(|r| r.entry.method == *method && r.entry.path == path)
    }

    /// Match an HTTP request to a route
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - If a matching route is found
    /// * `None` - If no route matches
    #[must_use]
    pub fn match_route(&self, method: Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");

        for route in &self.routes {
            if route.entry.method != method {
                continue;
            }
            if let Some(caps) = route.regex.captures(path) {
                let path_params = route
                    .param_names
                    .iter()
                    .enumerate()
                    .filter_map(|(i, name)| {
                        caps.get(i + 1)
                            .map(|m| (name.clone(), m.as_str().to_string()))
                    })
                    .collect();
                return Some(RouteMatch {
                    route: Arc::clone(&route.entry),
                    path_params,
                });
            }
        }

        warn!(method = %method, path = %path, "No route matched");
        None
    }

    /// All registered routes in registration order
    #[must_use]
    pub fn routes(&self) -> Vec<Arc<RouteEntry>> {
        self.routes.iter().map(|r| Arc::clone(&r.entry)).collect()
    }

    /// Names of registered blueprints
    #[must_use]
    pub fn blueprints(&self) -> &[String] {
        &self.blueprints
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Application for Router {
    type Route = RouteRegistration;
    type Blueprint = Blueprint;
    type Registered = BlueprintRegistration;
    type Error = RouterError;

    fn route(
        &mut self,
        path: &str,
        options: RouteOptions,
    ) -> Result<RouteRegistration, RouterError> {
        self.add_route(path, &options, None)
    }

    /// Replays the blueprint's deferred routes under `url_prefix`
    ///
    /// Either every deferred route is registered or none is.
    fn register_blueprint(
        &mut self,
        blueprint: Blueprint,
        name_prefix: Option<&str>,
        url_prefix: Option<&str>,
    ) -> Result<BlueprintRegistration, RouterError> {
        let name = name_prefix.unwrap_or(blueprint.name()).to_string();
        if self.blueprints.contains(&name) {
            return Err(RouterError::DuplicateBlueprint { name });
        }
        let url_prefix = url_prefix.unwrap_or_default().to_string();

        // every deferred route is compiled before any is inserted
        let mut pending: Vec<CompiledRoute> = Vec::new();
        let mut batches = Vec::new();
        for (path, options) in blueprint.into_deferred() {
            let full_path = format!("{url_prefix}{path}");
            let compiled = self.compile_route(&full_path, &options, Some(&name), &pending)?;
            batches.push((full_path, compiled.len()));
            pending.extend(compiled);
        }

        let mut routes = Vec::with_capacity(batches.len());
        let mut pending = pending.into_iter();
        for (full_path, count) in batches {
            let compiled: Vec<CompiledRoute> = pending.by_ref().take(count).collect();
            routes.push(self.commit(compiled, &full_path, Some(&name)));
        }

        info!(
            blueprint = %name,
            url_prefix = %url_prefix,
            deferred_routes = routes.len(),
            "Blueprint registered"
        );
        self.blueprints.push(name.clone());

        Ok(BlueprintRegistration {
            name,
            url_prefix,
            routes,
        })
    }
}

/// Parse a declared method name (any case) into a supported [`Method`]
pub fn parse_method(declared: &str) -> Result<Method, RouterError> {
    let upper = declared.trim().to_ascii_uppercase();
    Method::from_bytes(upper.as_bytes())
        .ok()
        .filter(|m| SUPPORTED_METHODS.contains(m))
        .ok_or_else(|| RouterError::UnsupportedMethod {
            method: declared.to_string(),
        })
}

/// Convert a path pattern to a regex and extract parameter names
///
/// Transforms path patterns like `/users/{id}` into regex patterns like
/// `^/users/([^/]+)$` and extracts parameter names `["id"]`. Literal segments
/// are escaped.
pub(crate) fn path_to_regex(path: &str) -> Result<(Regex, Vec<String>), regex::Error> {
    if path == "/" {
        return Ok((Regex::new(r"^/$")?, Vec::new()));
    }

    let mut pattern = String::with_capacity(path.len() + 5);
    pattern.push('^');
    let mut param_names = Vec::with_capacity(path.matches('{').count());

    for segment in path.split('/') {
        if segment.starts_with('{') && segment.ends_with('}') && segment.len() > 2 {
            let param_name = segment
                .trim_start_matches('{')
                .trim_end_matches('}')
                .to_string();
            pattern.push_str("/([^/]+)");
            param_names.push(param_name);
        } else if !segment.is_empty() {
            pattern.push('/');
            pattern.push_str(&regex::escape(segment));
        }
    }
    if path.ends_with('/') {
        pattern.push('/');
    }

    pattern.push('$');
    let regex = Regex::new(&pattern)?;

    Ok((regex, param_names))
}
