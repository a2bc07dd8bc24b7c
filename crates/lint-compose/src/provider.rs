use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::{load_fragments, ConfigError, ConfigFragment};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Other(String),
}

/// Options handed to a provider as-is. Their meaning belongs to the provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderOptions {
    values: Map<String, Value>,
}

impl ProviderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for ProviderOptions {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

/// Source of the base configuration that overrides are layered on.
pub trait RuleProvider {
    fn name(&self) -> &str {
        "anonymous"
    }

    fn base_config(&self, options: &ProviderOptions) -> Result<Vec<ConfigFragment>, ProviderError>;
}

/// Named wrapper around a factory function.
pub struct FnProvider<F> {
    name: String,
    factory: F,
}

impl<F> FnProvider<F>
where
    F: Fn(&ProviderOptions) -> Result<Vec<ConfigFragment>, ProviderError>,
{
    pub fn new(name: impl Into<String>, factory: F) -> Self {
        Self {
            name: name.into(),
            factory,
        }
    }
}

impl<F> RuleProvider for FnProvider<F>
where
    F: Fn(&ProviderOptions) -> Result<Vec<ConfigFragment>, ProviderError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn base_config(&self, options: &ProviderOptions) -> Result<Vec<ConfigFragment>, ProviderError> {
        (self.factory)(options)
    }
}

/// Base configuration that is already in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticProvider {
    fragments: Vec<ConfigFragment>,
}

impl StaticProvider {
    pub fn new(fragments: Vec<ConfigFragment>) -> Self {
        Self { fragments }
    }
}

impl RuleProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn base_config(
        &self,
        _options: &ProviderOptions,
    ) -> Result<Vec<ConfigFragment>, ProviderError> {
        Ok(self.fragments.clone())
    }
}

/// Pre-built rule set exported to a JSON file.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonFileProvider {
    path: PathBuf,
    required: bool,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    /// Like `new`, but a missing file yields an empty base.
    pub fn optional(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RuleProvider for JsonFileProvider {
    fn name(&self) -> &str {
        "json-file"
    }

    fn base_config(
        &self,
        _options: &ProviderOptions,
    ) -> Result<Vec<ConfigFragment>, ProviderError> {
        if !self.required && !self.path.exists() {
            tracing::debug!("{} not found, using empty base", self.path.display());
            return Ok(Vec::new());
        }
        Ok(load_fragments(&self.path)?)
    }
}
