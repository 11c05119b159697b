//! # Router Module
//!
//! An in-process route table that implements [`crate::app::Application`].
//!
//! ## Overview
//!
//! The router is the framework half of a documented application:
//! - Registering routes for one or more methods, rejecting duplicates
//! - Registering blueprints and replaying their deferred routes under a prefix
//! - Matching requests to registered routes and extracting path parameters
//!
//! It does not serve HTTP. It exists so that route declarations can be made,
//! checked and documented at build time (see [`crate::manifest`]) and so that
//! the interceptor can be exercised against a real registration pathway.
//!
//! ## Example
//!
//! ```rust
//! use routedoc::app::{Application, RouteOptions};
//! use routedoc::router::Router;
//! use http::Method;
//!
//! let mut router = Router::new();
//! router
//!     .route("/pets/{id}", RouteOptions::new().methods(["GET", "DELETE"]))
//!     .unwrap();
//!
//! let m = router.match_route(Method::GET, "/pets/42").unwrap();
//! assert_eq!(m.get_path_param("id"), Some("42"));
//! ```

mod blueprint;
mod core;
mod error;
#[cfg(test)]
mod tests;

pub use blueprint::{Blueprint, BlueprintRegistration};
pub use core::{parse_method, RouteEntry, RouteMatch, RouteRegistration, Router, SUPPORTED_METHODS};
pub use error::RouterError;
