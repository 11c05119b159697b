//! # Spec Module
//!
//! The spec module holds the shared OpenAPI accumulator that every documented
//! route writes into.
//!
//! ## Overview
//!
//! One [`ApiSpec`] exists per application. It is a cheap-to-clone handle; all
//! clones see the same paths and component schemas. The application and every
//! blueprint scope append into it during the declaration phase, and the final
//! document is rendered from it once declaration is finished.
//!
//! - **[`ApiSpec::path`]** - register operations (and an optional summary) under a path
//! - **[`ApiSpec::component_schema`]** - register a named model schema
//! - **[`SpecOptions`]** - out-of-band values handed to plugins at install time
//! - **Rendering** - [`ApiSpec::to_value`], [`ApiSpec::to_json`], [`ApiSpec::to_yaml`],
//!   [`ApiSpec::to_openapi`] and [`ApiSpec::write_to`]
//!
//! ## Example
//!
//! ```rust
//! use routedoc::spec::ApiSpec;
//! use serde_json::json;
//! use std::collections::BTreeMap;
//!
//! let spec = ApiSpec::new("Pet Store", "1.0.0");
//! let mut operations = BTreeMap::new();
//! operations.insert("get".to_string(), json!({"responses": {"200": {"description": "Success"}}}));
//! spec.path("/pets", operations, Some("Pets")).unwrap();
//!
//! assert_eq!(spec.paths(), vec!["/pets".to_string()]);
//! ```
//!
//! ## Concurrency
//!
//! Registration is expected to happen on one thread during startup. The handle
//! is `Send + Sync` so it can be stored in shared state afterwards; the lock is
//! only there to make that sound, not to support concurrent declaration.

mod builder;
mod options;
mod render;

pub use builder::{check_path, ApiSpec, PathEntry, DEFAULT_OPENAPI_VERSION};
pub use options::{SpecOptions, APP_OPTION};
pub use render::OutputFormat;
