//! # routedoc
//!
//! **routedoc** records OpenAPI documentation for routes at the moment they are
//! declared on a web application.
//!
//! ## Overview
//!
//! A documented application wraps the framework's route and blueprint
//! registration. Each declaration may carry a documentation descriptor
//! ([`Docs`](docs::Docs)); the descriptor is removed from the declaration,
//! turned into OpenAPI operations, merged into a shared [`ApiSpec`](spec::ApiSpec),
//! and the remaining declaration is forwarded to the framework unchanged.
//!
//! ## Architecture
//!
//! - **[`plugin`]** - The interceptor: [`DocsPlugin`](plugin::DocsPlugin),
//!   [`DocumentedApp`](plugin::DocumentedApp) and blueprint route scopes
//! - **[`spec`]** - Shared spec builder, options registry and rendering
//! - **[`docs`]** - Documentation descriptors and conversion to operations
//! - **[`schema`]** - Model schemas and the [`ApiModel`](schema::ApiModel) trait
//! - **[`app`]** - The [`Application`](app::Application) seam frameworks implement
//! - **[`router`]** - An in-process route table implementing `Application`
//! - **[`manifest`]** - Declaring routes in YAML/JSON and replaying them
//! - **[`config`]** / **[`logging`]** - Interceptor and logging configuration
//! - **[`cli`]** - The `routedoc` binary
//!
//! ### Declaration Flow
//!
//! ```text
//! app.route("/hello", options{methods, docs, ..})
//!   │
//!   ├─ docs taken out of options
//!   ├─ methods lower-cased, ["get"] when absent
//!   ├─ docs.build_operations(spec, methods) ──► components.schemas
//!   ├─ spec.path("/hello", operations, summary)
//!   └─ framework.route("/hello", options{methods, ..}) ──► returned to caller
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use routedoc::prelude::*;
//!
//! let spec = ApiSpec::new("Demo", "1.0.0").with_option(APP_OPTION, Router::new());
//! let mut app = DocsPlugin::new(true).install::<Router>(&spec).unwrap();
//!
//! // no docs, but default docs are enabled
//! app.route("/health", RouteOptions::new()).unwrap();
//!
//! let mut v1 = app
//!     .register_blueprint(Blueprint::new("items"), None, Some("/v1"))
//!     .unwrap();
//! v1.route("/items", RouteOptions::new().methods(["GET", "POST"])).unwrap();
//!
//! assert_eq!(spec.paths(), vec!["/health", "/v1/items"]);
//! assert!(spec.operation("/v1/items", "post").unwrap().get("requestBody").is_some());
//! println!("{}", spec.to_yaml().unwrap());
//! ```
//!
//! ## Logging
//!
//! Library code emits `tracing` events only. The binary installs a subscriber
//! configured from `ROUTEDOC_LOG_LEVEL` and `ROUTEDOC_LOG_FORMAT`; see
//! [`logging`].

pub mod app;
pub mod cli;
pub mod config;
pub mod docs;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod method;
pub mod plugin;
pub mod router;
pub mod schema;
pub mod spec;

pub use error::{DocError, RouteError};

/// Commonly used types
pub mod prelude {
    pub use crate::app::{Application, RouteOptions};
    pub use crate::config::DocsConfig;
    pub use crate::docs::{Docs, Operation, Response};
    pub use crate::error::{DocError, RouteError};
    pub use crate::method::BodyPolicy;
    pub use crate::plugin::{BlueprintRoutes, DocsPlugin, DocumentedApp};
    pub use crate::router::{Blueprint, Router};
    pub use crate::schema::{ApiModel, BaseModel, ModelSchema};
    pub use crate::spec::{ApiSpec, OutputFormat, APP_OPTION};
}
