//! HTTP method handling for documentation capture.
//!
//! Methods arrive from route declarations in whatever case the caller wrote
//! them. Everything the spec builder stores is keyed by the lower-cased name,
//! so normalization happens once, here.
//!
//! [`BodyPolicy`] decides whether a synthesized operation for a method gets a
//! placeholder request body. The standard table marks retrieval, deletion,
//! existence-check and options requests as body-less.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Methods used when a route declares none
pub const DEFAULT_METHODS: &[&str] = &["get"];

/// Operation keys an OpenAPI path item accepts
pub const OPENAPI_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Lower-case a single method name
#[inline]
#[must_use]
pub fn normalize_method(method: &str) -> String {
    method.trim().to_ascii_lowercase()
}

/// Lower-case a method list, dropping repeats while keeping declaration order
///
/// Idempotent: normalizing an already normalized list returns it unchanged.
///
/// ```
/// use routedoc::method::normalize_methods;
///
/// assert_eq!(normalize_methods(["POST", "Get", "post"]), vec!["post", "get"]);
/// ```
pub fn normalize_methods<I, S>(methods: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for method in methods {
        let m = normalize_method(method.as_ref());
        if !m.is_empty() && !out.contains(&m) {
            out.push(m);
        }
    }
    out
}

/// True when `method` (any case) is a valid OpenAPI operation key
#[must_use]
pub fn is_openapi_method(method: &str) -> bool {
    OPENAPI_METHODS.contains(&normalize_method(method).as_str())
}

/// Table of "does this method carry a request body by default"
///
/// Methods missing from the table fall back to `fallback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawBodyPolicy")]
pub struct BodyPolicy {
    methods: BTreeMap<String, bool>,
    fallback: bool,
}

/// Deserialization shape; keys are normalized on the way in
#[derive(Deserialize)]
struct RawBodyPolicy {
    #[serde(default)]
    methods: BTreeMap<String, bool>,
    #[serde(default = "default_fallback")]
    fallback: bool,
}

fn default_fallback() -> bool {
    true
}

impl From<RawBodyPolicy> for BodyPolicy {
    fn from(raw: RawBodyPolicy) -> Self {
        raw.methods
            .into_iter()
            .fold(Self::empty(raw.fallback), |policy, (method, has_body)| {
                policy.with(&method, has_body)
            })
    }
}

impl Default for BodyPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl BodyPolicy {
    /// `get`, `delete`, `head` and `options` carry no body; everything else does
    #[must_use]
    pub fn standard() -> Self {
        Self::empty(true)
            .with("get", false)
            .with("delete", false)
            .with("head", false)
            .with("options", false)
    }

    /// A policy with no entries
    #[must_use]
    pub fn empty(fallback: bool) -> Self {
        Self {
            methods: BTreeMap::new(),
            fallback,
        }
    }

    /// Set the entry for `method`, replacing any previous one
    #[must_use]
    pub fn with(mut self, method: &str, has_body: bool) -> Self {
        self.methods.insert(normalize_method(method), has_body);
        self
    }

    /// Change the answer for methods not listed in the table
    #[must_use]
    pub fn fallback(mut self, has_body: bool) -> Self {
        self.fallback = has_body;
        self
    }

    #[must_use]
    pub fn has_request_body(&self, method: &str) -> bool {
        self.methods
            .get(&normalize_method(method))
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Overlay `other` on top of this policy
    ///
    /// Entries in `other` win; the fallback is taken from `other`.
    #[must_use]
    pub fn merged(mut self, other: &BodyPolicy) -> Self {
        for (method, has_body) in &other.methods {
            self.methods.insert(method.clone(), *has_body);
        }
        self.fallback = other.fallback;
        self
    }
}
