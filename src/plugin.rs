//! # Route Documentation Interceptor
//!
//! [`DocsPlugin`] wraps an [`Application`] so that every route declaration
//! first records its documentation into the shared [`ApiSpec`] and then goes
//! to the framework unchanged.
//!
//! ## Flow
//!
//! ```text
//! DocumentedApp::route(path, options)
//!   ├─ take `docs` out of the options
//!   ├─ normalize methods (["get"] when none declared)
//!   ├─ no docs + generate_default_docs → synthesize BaseModel docs
//!   ├─ docs → build_operations → ApiSpec::path(path, operations, summary)
//!   └─ Application::route(path, options without docs)
//! ```
//!
//! Blueprint routes take the same path after their URL prefix is prepended;
//! see [`BlueprintRoutes`].
//!
//! ## Installing
//!
//! ```rust
//! use routedoc::prelude::*;
//!
//! let spec = ApiSpec::new("Pet Store", "1.0.0").with_option(APP_OPTION, Router::new());
//! let mut app = DocsPlugin::new(false).install::<Router>(&spec).unwrap();
//!
//! app.route(
//!     "/hello",
//!     RouteOptions::new()
//!         .methods(["post"])
//!         .docs(Docs::new().post(
//!             Operation::new()
//!                 .request(ModelSchema::base_model())
//!                 .response(ModelSchema::base_model()),
//!         )),
//! )
//! .unwrap();
//!
//! assert_eq!(spec.paths(), vec!["/hello".to_string()]);
//! ```
//!
//! The application is consumed from the spec options. Installing twice
//! against the same spec fails with [`DocError::MissingApplication`] instead
//! of wrapping the application a second time.

use crate::app::{Application, RouteOptions};
use crate::config::DocsConfig;
use crate::docs::{Docs, Operation};
use crate::error::{DocError, RouteError};
use crate::method::normalize_methods;
use crate::schema::ModelSchema;
use crate::spec::{check_path, ApiSpec, APP_OPTION};
use std::any::{type_name, Any};
use tracing::{debug, info};

/// Factory for documented applications
#[derive(Debug, Clone, Default)]
pub struct DocsPlugin {
    config: DocsConfig,
}

impl DocsPlugin {
    /// Plugin with the standard body policy
    #[must_use]
    pub fn new(generate_default_docs: bool) -> Self {
        Self::with_config(DocsConfig::new(generate_default_docs))
    }

    #[must_use]
    pub fn with_config(config: DocsConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DocsConfig {
        &self.config
    }

    /// Take the application out of `spec`'s options and wrap it
    ///
    /// # Errors
    ///
    /// - [`DocError::MissingApplication`] when no value is stored under [`APP_OPTION`]
    /// - [`DocError::OptionType`] when the stored value is not an `A`; it is left in place
    pub fn install<A>(&self, spec: &ApiSpec) -> Result<DocumentedApp<A>, DocError>
    where
        A: Application + Any + Send + Sync,
    {
        let app = spec
            .take_option::<A>(APP_OPTION)?
            .ok_or_else(|| DocError::MissingApplication {
                key: APP_OPTION.to_string(),
            })?;

        info!(
            application = type_name::<A>(),
            generate_default_docs = self.config.generate_default_docs,
            "Docs plugin installed"
        );

        Ok(DocumentedApp::new(app, spec.clone(), self.config.clone()))
    }
}

/// An application whose route and blueprint registration are documented
pub struct DocumentedApp<A> {
    app: A,
    spec: ApiSpec,
    config: DocsConfig,
}

impl<A: std::fmt::Debug> std::fmt::Debug for DocumentedApp<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentedApp")
            .field("app", &self.app)
            .field("spec", &self.spec)
            .field("config", &self.config)
            .finish()
    }
}

impl<A: Application> DocumentedApp<A> {
    /// Wrap `app` directly, without going through the spec options
    pub fn new(app: A, spec: ApiSpec, config: DocsConfig) -> Self {
        Self { app, spec, config }
    }

    /// Document and register a route
    ///
    /// Documentation is written before the framework is called. If the
    /// framework then fails, the documentation stays in the spec.
    ///
    /// # Errors
    ///
    /// - [`RouteError::Docs`] if the descriptor cannot be converted or the spec
    ///   rejects it; the framework is not called
    /// - [`RouteError::Framework`] with the framework's own error
    pub fn route(
        &mut self,
        path: &str,
        mut options: RouteOptions,
    ) -> Result<A::Route, RouteError<A::Error>> {
        let docs = options.take_docs();
        document_route(&self.spec, &self.config, path, &options, docs)?;
        self.app.route(path, options).map_err(RouteError::Framework)
    }

    /// Register a blueprint and return a scope for declaring its routes
    ///
    /// Routes declared through the returned [`BlueprintRoutes`] are documented
    /// and registered under `url_prefix` (empty when `None`).
    pub fn register_blueprint(
        &mut self,
        blueprint: A::Blueprint,
        name_prefix: Option<&str>,
        url_prefix: Option<&str>,
    ) -> Result<BlueprintRoutes<'_, A>, RouteError<A::Error>> {
        let registration = self
            .app
            .register_blueprint(blueprint, name_prefix, url_prefix)
            .map_err(RouteError::Framework)?;

        let url_prefix = url_prefix.unwrap_or_default().to_string();
        debug!(
            url_prefix = %url_prefix,
            name_prefix = ?name_prefix,
            "Blueprint registered; routes declared on it will be documented"
        );

        Ok(BlueprintRoutes {
            app: self,
            url_prefix,
            name_prefix: name_prefix.map(str::to_string),
            registration,
        })
    }

    #[must_use]
    pub fn spec(&self) -> &ApiSpec {
        &self.spec
    }

    #[must_use]
    pub fn config(&self) -> &DocsConfig {
        &self.config
    }

    #[must_use]
    pub fn app(&self) -> &A {
        &self.app
    }

    /// Direct access to the framework; routes registered here are not documented
    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn into_inner(self) -> A {
        self.app
    }
}

/// Route declarations on a registered blueprint
///
/// Every path is prefixed with the blueprint's URL prefix and then goes
/// through [`DocumentedApp::route`], so blueprint routes end up in the same
/// spec and the same framework registration as application routes.
pub struct BlueprintRoutes<'a, A: Application> {
    app: &'a mut DocumentedApp<A>,
    url_prefix: String,
    name_prefix: Option<String>,
    registration: A::Registered,
}

impl<A: Application> std::fmt::Debug for BlueprintRoutes<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlueprintRoutes")
            .field("url_prefix", &self.url_prefix)
            .field("name_prefix", &self.name_prefix)
            .finish_non_exhaustive()
    }
}

impl<A: Application> BlueprintRoutes<'_, A> {
    /// Document and register `url_prefix + path`
    pub fn route(
        &mut self,
        path: &str,
        options: RouteOptions,
    ) -> Result<A::Route, RouteError<A::Error>> {
        let full_path = format!("{}{}", self.url_prefix, path);
        self.app.route(&full_path, options)
    }

    #[must_use]
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    #[must_use]
    pub fn name_prefix(&self) -> Option<&str> {
        self.name_prefix.as_deref()
    }

    /// What the framework returned from blueprint registration
    #[must_use]
    pub fn registration(&self) -> &A::Registered {
        &self.registration
    }

    pub fn into_registration(self) -> A::Registered {
        self.registration
    }
}

/// Placeholder docs for every method in `methods`
///
/// Responses always use [`ModelSchema::base_model`]; request bodies only where
/// the body policy says the method has one.
#[must_use]
pub fn default_docs(methods: &[String], config: &DocsConfig) -> Docs {
    methods.iter().fold(Docs::new(), |docs, method| {
        let mut operation = Operation::new().response(ModelSchema::base_model());
        if config.body_policy.has_request_body(method) {
            operation = operation.request(ModelSchema::base_model());
        }
        docs.operation(method, operation)
    })
}

fn document_route(
    spec: &ApiSpec,
    config: &DocsConfig,
    path: &str,
    options: &RouteOptions,
    docs: Option<Docs>,
) -> Result<(), DocError> {
    let methods = normalize_methods(options.method_list());

    let docs = match docs {
        Some(docs) => docs,
        None if config.generate_default_docs => {
            debug!(path = %path, methods = ?methods, "Synthesizing default docs");
            default_docs(&methods, config)
        }
        None => {
            debug!(path = %path, "Route declared without docs");
            return Ok(());
        }
    };

    check_path(path, methods.iter().map(String::as_str))?;
    let operations = docs.build_operations(spec, &methods)?;
    spec.path(path, operations, docs.get_summary())
}
