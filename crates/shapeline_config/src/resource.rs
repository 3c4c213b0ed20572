//! Per-resource configuration.

use crate::field::FieldConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How listing columns are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintOrderBy {
    /// Field declaration order
    #[default]
    Declaration,
    /// Ascending `print.index`, ties in declaration order
    Index,
}

/// Resource-level listing options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourcePrintConfig {
    /// Column ordering rule
    #[serde(default)]
    pub order_by: PrintOrderBy,
    /// Append the trailing AGE column
    #[serde(default = "default_true")]
    pub add_age_column: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ResourcePrintConfig {
    fn default() -> Self {
        Self {
            order_by: PrintOrderBy::Declaration,
            add_age_column: true,
        }
    }
}

/// Configuration of one resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    /// Override directives keyed by resource field name, in authoring order
    #[serde(default)]
    pub fields: IndexMap<String, FieldConfig>,
    /// Field names placed in the Ignored slot
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Listing options
    #[serde(default)]
    pub print: ResourcePrintConfig,
}

impl ResourceConfig {
    /// Create an empty configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field directive
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, config: FieldConfig) -> Self {
        self.fields.insert(name.into(), config);
        self
    }

    /// Ignore a field
    #[must_use]
    pub fn with_ignored(mut self, name: impl Into<String>) -> Self {
        self.ignore.push(name.into());
        self
    }

    /// Order listing columns by index
    #[must_use]
    pub fn with_order_by(mut self, order_by: PrintOrderBy) -> Self {
        self.print.order_by = order_by;
        self
    }

    /// Directive for a field, if any
    #[must_use]
    pub fn directive(&self, field: &str) -> Option<&FieldConfig> {
        self.fields.get(field)
    }

    /// Whether the field is listed in `ignore`
    #[must_use]
    pub fn is_ignored(&self, field: &str) -> bool {
        self.ignore.iter().any(|f| f == field)
    }

    /// Roots of every redirect path, in authoring order
    pub fn redirect_roots(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|(name, cfg)| cfg.from.as_ref().map(|from| (name.as_str(), from.root())))
    }
}
