//! # Docs Configuration
//!
//! Behaviour of the documentation interceptor, loaded from environment
//! variables or from a YAML/TOML file.
//!
//! ## Environment Variables
//!
//! ### `ROUTEDOC_GENERATE_DEFAULT_DOCS`
//!
//! When `true` (also `1`/`yes`/`on`), routes declared without a descriptor are
//! documented with placeholder `BaseModel` schemas. Default: `false`.
//!
//! ## File Format
//!
//! ```yaml
//! generate_default_docs: true
//! body_policy:
//!   methods:
//!     delete: true
//!   fallback: true
//! ```
//!
//! The same keys work in TOML. Entries under `body_policy.methods` are laid
//! over the standard table, so only deviations need to be listed.

use crate::method::BodyPolicy;
use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Interceptor configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocsConfig {
    /// Synthesize placeholder docs for routes declared without any
    pub generate_default_docs: bool,
    /// Which methods get a placeholder request body when docs are synthesized
    pub body_policy: BodyPolicy,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    generate_default_docs: Option<bool>,
    #[serde(default)]
    body_policy: Option<BodyPolicy>,
}

impl DocsConfig {
    #[must_use]
    pub fn new(generate_default_docs: bool) -> Self {
        Self {
            generate_default_docs,
            body_policy: BodyPolicy::standard(),
        }
    }

    #[must_use]
    pub fn with_body_policy(mut self, policy: BodyPolicy) -> Self {
        self.body_policy = policy;
        self
    }

    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let generate_default_docs = env::var("ROUTEDOC_GENERATE_DEFAULT_DOCS")
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(false);
        Self::new(generate_default_docs)
    }

    /// Load configuration from a `.yaml`/`.yml`, `.toml` or `.json` file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read docs config {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        let file: FileConfig = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "toml" => toml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };
        Ok(Self::default().overlay(file))
    }

    fn overlay(mut self, file: FileConfig) -> Self {
        if let Some(flag) = file.generate_default_docs {
            self.generate_default_docs = flag;
        }
        if let Some(policy) = file.body_policy {
            self.body_policy = self.body_policy.merged(&policy);
        }
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
