use crate::error::DocError;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;

/// Option key under which the application is handed to the docs plugin
pub const APP_OPTION: &str = "app";

/// Out-of-band values attached to a spec
///
/// Values are stored type-erased. Consumers take them back out with the type
/// they expect; a value of another type is left in place and reported as a
/// configuration error.
#[derive(Default)]
pub struct SpecOptions {
    values: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl fmt::Debug for SpecOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("SpecOptions").field("keys", &keys).finish()
    }
}

impl SpecOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(key.into(), Box::new(value));
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Borrow the value under `key` if it has type `T`
    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    /// Remove and return the value under `key`
    ///
    /// Returns `Ok(None)` when the key is absent. When the stored value is not
    /// a `T` it stays in the registry and `DocError::OptionType` is returned.
    pub fn take<T: Any + Send + Sync>(&mut self, key: &str) -> Result<Option<T>, DocError> {
        let Some(boxed) = self.values.remove(key) else {
            return Ok(None);
        };
        match boxed.downcast::<T>() {
            Ok(value) => Ok(Some(*value)),
            Err(original) => {
                self.values.insert(key.to_string(), original);
                Err(DocError::OptionType {
                    key: key.to_string(),
                    expected: type_name::<T>(),
                })
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
