use std::fmt;

/// Route or blueprint registration rejected by [`super::Router`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// Paths must be absolute
    InvalidPath {
        /// The rejected path
        path: String,
    },
    /// Method is not one the router dispatches
    UnsupportedMethod {
        /// Method as declared
        method: String,
    },
    /// The (method, path) pair is already registered
    Conflict {
        /// Upper-case method
        method: String,
        /// Full path
        path: String,
    },
    /// A blueprint with this name is already registered
    DuplicateBlueprint {
        /// Blueprint name (name prefix or the blueprint's own name)
        name: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::InvalidPath { path } => {
                write!(f, "route path '{path}' must start with '/'")
            }
            RouterError::UnsupportedMethod { method } => {
                write!(f, "unsupported HTTP method '{method}'")
            }
            RouterError::Conflict { method, path } => {
                write!(f, "duplicate route: {method} {path} is already registered")
            }
            RouterError::DuplicateBlueprint { name } => {
                write!(f, "a blueprint named '{name}' is already registered")
            }
        }
    }
}

impl std::error::Error for RouterError {}
