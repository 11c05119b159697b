#![allow(dead_code, clippy::expect_used)]

use routedoc::prelude::*;
use std::fmt;

/// Failure reported by [`RecordingApp`] when it is told to fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeError(pub String);

impl fmt::Display for FakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "framework rejected route: {}", self.0)
    }
}

impl std::error::Error for FakeError {}

/// Application that records every call it receives
#[derive(Debug, Default)]
pub struct RecordingApp {
    pub routes: Vec<(String, RouteOptions)>,
    pub blueprints: Vec<(String, Option<String>, Option<String>)>,
    pub fail_with: Option<String>,
}

impl RecordingApp {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn paths(&self) -> Vec<&str> {
        self.routes.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Application for RecordingApp {
    /// Number of routes registered so far
    type Route = usize;
    type Blueprint = String;
    type Registered = String;
    type Error = FakeError;

    fn route(&mut self, path: &str, options: RouteOptions) -> Result<usize, FakeError> {
        if let Some(message) = &self.fail_with {
            return Err(FakeError(message.clone()));
        }
        self.routes.push((path.to_string(), options));
        Ok(self.routes.len())
    }

    fn register_blueprint(
        &mut self,
        blueprint: String,
        name_prefix: Option<&str>,
        url_prefix: Option<&str>,
    ) -> Result<String, FakeError> {
        self.blueprints.push((
            blueprint.clone(),
            name_prefix.map(str::to_string),
            url_prefix.map(str::to_string),
        ));
        Ok(format!("registered:{blueprint}"))
    }
}

/// Spec holding `app` under the application option, plus the installed wrapper
pub fn install<A>(app: A, config: DocsConfig) -> (ApiSpec, DocumentedApp<A>)
where
    A: Application + Send + Sync + 'static,
{
    let spec = ApiSpec::new("Test API", "1.0.0").with_option(APP_OPTION, app);
    let documented = DocsPlugin::with_config(config)
        .install::<A>(&spec)
        .expect("application present");
    (spec, documented)
}

pub fn base_ref() -> serde_json::Value {
    serde_json::json!({"$ref": "#/components/schemas/BaseModel"})
}
