use std::fmt;

/// Documentation-side failure
///
/// Covers the three ways documentation capture can fail: the interceptor was
/// installed without an application (configuration), a descriptor could not
/// be turned into OpenAPI operations (conversion), or the spec builder
/// rejected a registration (spec).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocError {
    /// The application reference was not present in the spec options at install time
    MissingApplication {
        /// Option key that was looked up
        key: String,
    },
    /// An option exists but holds a value of a different type
    OptionType {
        /// Option key that was looked up
        key: String,
        /// Type name the caller asked for
        expected: &'static str,
    },
    /// A descriptor is present but has no entry for a declared method
    MissingOperation {
        /// Lower-cased method name
        method: String,
    },
    /// A model schema cannot be used as an OpenAPI component
    InvalidSchema {
        /// Component name of the offending model
        name: String,
        /// Why the schema was rejected
        reason: String,
    },
    /// A component name is already registered with a different schema
    SchemaConflict {
        /// Component name
        name: String,
    },
    /// Path rejected by the spec builder
    InvalidPath {
        /// Offending path
        path: String,
    },
    /// Operation key is not an OpenAPI HTTP verb
    InvalidMethod {
        /// Path the operation was registered on
        path: String,
        /// Offending key
        method: String,
    },
    /// The accumulated document could not be serialized
    Render {
        /// Serializer message
        message: String,
    },
}

impl fmt::Display for DocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocError::MissingApplication { key } => write!(
                f,
                "configuration error: no application found under spec option '{key}'. \
                 Insert the application into the spec options before installing the docs plugin."
            ),
            DocError::OptionType { key, expected } => write!(
                f,
                "configuration error: spec option '{key}' does not hold a value of type {expected}"
            ),
            DocError::MissingOperation { method } => write!(
                f,
                "conversion error: docs declare no operation for method '{method}'"
            ),
            DocError::InvalidSchema { name, reason } => {
                write!(f, "conversion error: schema '{name}' is invalid: {reason}")
            }
            DocError::SchemaConflict { name } => write!(
                f,
                "conversion error: component schema '{name}' is already registered with a different definition"
            ),
            DocError::InvalidPath { path } => {
                write!(f, "spec error: path '{path}' must start with '/'")
            }
            DocError::InvalidMethod { path, method } => write!(
                f,
                "spec error: '{method}' on path '{path}' is not an OpenAPI operation"
            ),
            DocError::Render { message } => write!(f, "spec error: failed to render document: {message}"),
        }
    }
}

impl std::error::Error for DocError {}

impl DocError {
    /// True for failures raised while installing the plugin
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DocError::MissingApplication { .. } | DocError::OptionType { .. }
        )
    }
}

/// Failure of an intercepted registration call
///
/// Keeps documentation failures apart from failures of the wrapped framework.
/// When `Framework` is returned, any documentation already written for that
/// call stays in the spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError<E> {
    /// Descriptor conversion or spec registration failed; the framework was not called
    Docs(DocError),
    /// The wrapped framework rejected the registration
    Framework(E),
}

impl<E: fmt::Display> fmt::Display for RouteError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::Docs(err) => write!(f, "{err}"),
            RouteError::Framework(err) => write!(f, "route registration failed: {err}"),
        }
    }
}

impl<E> std::error::Error for RouteError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouteError::Docs(err) => Some(err),
            RouteError::Framework(err) => Some(err),
        }
    }
}

impl<E> From<DocError> for RouteError<E> {
    fn from(err: DocError) -> Self {
        RouteError::Docs(err)
    }
}
