//! Top-level generator configuration document.

use crate::error::ConfigError;
use crate::resource::ResourceConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Generator configuration: one [`ResourceConfig`] per resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Resources in authoring order
    #[serde(default)]
    pub resources: IndexMap<String, ResourceConfig>,
}

impl GeneratorConfig {
    /// Create an empty configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource
    #[must_use]
    pub fn with_resource(mut self, name: impl Into<String>, config: ResourceConfig) -> Self {
        self.resources.insert(name.into(), config);
        self
    }

    /// Decode from YAML
    ///
    /// # Errors
    ///
    /// Returns error if the text is malformed or uses unknown keys
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Decode from JSON
    ///
    /// # Errors
    ///
    /// Returns error if the text is malformed or uses unknown keys
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a configuration; `.json` files are decoded as JSON, anything else as YAML
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or decoded
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text)?,
            _ => Self::from_yaml_str(&text)?,
        };
        tracing::debug!(
            path = %path.display(),
            resources = config.resources.len(),
            "generator config loaded"
        );
        Ok(config)
    }

    /// Configuration for a resource
    ///
    /// # Errors
    ///
    /// Returns error if the resource is not configured
    pub fn resource(&self, name: &str) -> Result<&ResourceConfig, ConfigError> {
        self.resources
            .get(name)
            .ok_or_else(|| ConfigError::UnknownResource(name.to_string()))
    }

    /// Configuration for a resource, or an empty one
    #[must_use]
    pub fn resource_or_default(&self, name: &str) -> ResourceConfig {
        self.resources.get(name).cloned().unwrap_or_default()
    }
}
