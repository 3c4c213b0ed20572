//! Configuration loading errors.

/// Error loading a generator configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The document could not be read
    #[error("IO error: {0}")]
    Io(String),
    /// The YAML document is malformed or has unknown keys
    #[error("YAML error: {0}")]
    Yaml(String),
    /// The JSON document is malformed or has unknown keys
    #[error("JSON error: {0}")]
    Json(String),
    /// A resource was requested that the document does not configure
    #[error("resource not configured: {0}")]
    UnknownResource(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
