use super::core::RouteRegistration;
use crate::app::RouteOptions;
use tracing::warn;

/// A named group of routes mergeable into a [`super::Router`] under a prefix
///
/// Routes declared on the blueprint itself are deferred and replayed when the
/// blueprint is registered. They are not documented: to document blueprint
/// routes, declare them through the scope returned by
/// [`crate::plugin::DocumentedApp::register_blueprint`].
#[derive(Debug, Clone, Default)]
pub struct Blueprint {
    name: String,
    deferred: Vec<(String, RouteOptions)>,
}

impl Blueprint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deferred: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Defer a route until registration
    pub fn route(&mut self, path: &str, mut options: RouteOptions) -> &mut Self {
        if options.take_docs().is_some() {
            warn!(
                blueprint = %self.name,
                path = %path,
                "Docs on a route declared before blueprint registration are ignored"
            );
        }
        self.deferred.push((path.to_string(), options));
        self
    }

    #[must_use]
    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }

    pub(super) fn into_deferred(self) -> Vec<(String, RouteOptions)> {
        self.deferred
    }
}

/// Result of registering a [`Blueprint`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlueprintRegistration {
    /// Name under which the blueprint was registered
    pub name: String,
    pub url_prefix: String,
    /// Deferred routes replayed at registration
    pub routes: Vec<RouteRegistration>,
}
