//! Framework seam.
//!
//! [`Application`] is what a web framework has to offer for its routes to be
//! documented: a route-registration function and a blueprint-registration
//! function. [`RouteOptions`] is the keyword-argument bag passed to route
//! registration; it carries the documentation descriptor under the reserved
//! `docs` key, which is always removed before the framework sees the options.

use crate::docs::Docs;
use crate::method::DEFAULT_METHODS;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Reserved option key holding the documentation descriptor
pub const DOCS_KEY: &str = "docs";

/// A web application whose route declarations can be documented
pub trait Application {
    /// Value returned by route registration
    type Route;
    /// Sub-application mergeable under a prefix
    type Blueprint;
    /// Value returned by blueprint registration
    type Registered;
    type Error: std::error::Error + Send + Sync + 'static;

    fn route(&mut self, path: &str, options: RouteOptions) -> Result<Self::Route, Self::Error>;

    fn register_blueprint(
        &mut self,
        blueprint: Self::Blueprint,
        name_prefix: Option<&str>,
        url_prefix: Option<&str>,
    ) -> Result<Self::Registered, Self::Error>;
}

/// Options passed to route registration
///
/// `methods` is forwarded exactly as declared; documentation works on a
/// normalized copy. Framework-specific options go in `extra`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteOptions {
    methods: Option<Vec<String>>,
    extra: BTreeMap<String, Value>,
    docs: Option<Docs>,
}

impl RouteOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    /// Attach a documentation descriptor
    #[must_use]
    pub fn docs(mut self, docs: Docs) -> Self {
        self.docs = Some(docs);
        self
    }

    /// Set a framework option
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Declared methods, as given
    #[must_use]
    pub fn declared_methods(&self) -> Option<&[String]> {
        self.methods.as_deref()
    }

    /// Declared methods, or `["get"]` when none were declared
    #[must_use]
    pub fn method_list(&self) -> Vec<String> {
        match &self.methods {
            Some(methods) => methods.clone(),
            None => DEFAULT_METHODS.iter().map(|m| (*m).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    #[must_use]
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    #[must_use]
    pub fn has_docs(&self) -> bool {
        self.docs.is_some()
    }

    /// Remove the descriptor and any stray `docs` entry from the framework options
    pub fn take_docs(&mut self) -> Option<Docs> {
        if self.extra.remove(DOCS_KEY).is_some() {
            warn!(
                key = DOCS_KEY,
                "Reserved option key set as a framework option; dropped before forwarding"
            );
        }
        self.docs.take()
    }
}
