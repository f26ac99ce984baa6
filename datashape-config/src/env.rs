// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;

/// Reads process environment variables, optionally scoped to a prefix.
///
/// With prefix `DATASHAPE`, `DATASHAPE_DATE_FORMAT` is exposed as
/// `date_format`.
#[derive(Debug, Clone, Default)]
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// All matching variables, keyed by lowercase name without the prefix.
    pub fn load(&self) -> Result<HashMap<String, String>> {
        let mut config = HashMap::new();

        for (key, value) in env::vars() {
            match self.strip(&key) {
                Some(stripped) if !stripped.is_empty() => {
                    config.insert(stripped.to_lowercase(), value);
                }
                _ => {}
            }
        }

        Ok(config)
    }

    /// Load one variable by its unprefixed name.
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.full_key(key)).map_err(ConfigError::EnvError)
    }

    /// Like [`EnvLoader::load_var`], but `None` when unset or not unicode.
    pub fn load_var_opt(&self, key: &str) -> Option<String> {
        self.load_var(key).ok()
    }

    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }

    fn full_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }

    fn strip<'a>(&self, key: &'a str) -> Option<&'a str> {
        match &self.prefix {
            Some(prefix) => key.strip_prefix(prefix.as_str())?.strip_prefix('_'),
            None => Some(key),
        }
    }
}
