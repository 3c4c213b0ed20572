//! Per-field override directives.

use serde::{Deserialize, Serialize};

/// Take the field's type from a member of another operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceFieldConfig {
    /// Operation whose shapes hold the member
    pub operation: String,
    /// Dot-separated member path, e.g. `Code.Location`
    pub path: String,
}

impl SourceFieldConfig {
    /// Create a redirect
    #[must_use]
    pub fn new(operation: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            path: path.into(),
        }
    }

    /// First path segment
    #[must_use]
    pub fn root(&self) -> &str {
        self.path.split('.').next().unwrap_or_default()
    }
}

/// How two values of the field are compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareFieldConfig {
    /// Exclude the field from difference computation
    #[serde(default)]
    pub is_ignored: bool,
    /// Treat "not set" and "set to zero value" as equal
    #[serde(default)]
    pub nil_equals_zero_value: bool,
}

/// Listing column for the field
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrintFieldConfig {
    /// Column header replacing the field name
    #[serde(default)]
    pub name: Option<String>,
    /// 0 shows in the standard view, greater than 0 only in the wide view
    #[serde(default)]
    pub priority: u32,
    /// Position when the resource orders columns by index
    #[serde(default)]
    pub index: i64,
}

/// Backoff bounds for late-initialization retries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LateInitializeConfig {
    /// Lower bound in seconds
    #[serde(default)]
    pub min_backoff_seconds: u64,
    /// Upper bound in seconds
    pub max_backoff_seconds: u64,
}

/// Override directives for one field.
///
/// Tri-state flags (`Option<bool>`) distinguish "not set" from an explicit
/// `false`, which suppresses the matching heuristic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    /// Value lives in the resource's string-keyed attributes map
    #[serde(default)]
    pub is_attribute: bool,
    /// Force the field into Status (`true`) or Spec (`false`)
    #[serde(default)]
    pub is_read_only: Option<bool>,
    /// Required marker
    #[serde(default)]
    pub is_required: Option<bool>,
    /// Primary identifier of the resource
    #[serde(default)]
    pub is_primary_key: Option<bool>,
    /// Holds the owning account id
    #[serde(default)]
    pub is_owner_account_id: bool,
    /// ARN of the resource
    #[serde(default)]
    pub is_arn: Option<bool>,
    /// Rendered as a secret reference
    #[serde(default)]
    pub is_secret: bool,
    /// Changes after creation are flagged
    #[serde(default)]
    pub is_immutable: bool,
    /// Source redirection
    #[serde(default)]
    pub from: Option<SourceFieldConfig>,
    /// Comparison policy
    #[serde(default)]
    pub compare: Option<CompareFieldConfig>,
    /// Listing column policy
    #[serde(default)]
    pub print: Option<PrintFieldConfig>,
    /// Late-initialization policy
    #[serde(default)]
    pub late_initialize: Option<LateInitializeConfig>,
}

impl FieldConfig {
    /// Create an empty directive set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attribute flag
    #[must_use]
    pub fn with_attribute(mut self) -> Self {
        self.is_attribute = true;
        self
    }

    /// Set the read-only flag
    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.is_read_only = Some(read_only);
        self
    }

    /// Set the required flag
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.is_required = Some(required);
        self
    }

    /// Set the primary-key flag
    #[must_use]
    pub fn with_primary_key(mut self, primary_key: bool) -> Self {
        self.is_primary_key = Some(primary_key);
        self
    }

    /// Set the ARN flag
    #[must_use]
    pub fn with_arn(mut self, arn: bool) -> Self {
        self.is_arn = Some(arn);
        self
    }

    /// Set the owner-account flag
    #[must_use]
    pub fn with_owner_account_id(mut self) -> Self {
        self.is_owner_account_id = true;
        self
    }

    /// Set the secret flag
    #[must_use]
    pub fn with_secret(mut self) -> Self {
        self.is_secret = true;
        self
    }

    /// Set the immutable flag
    #[must_use]
    pub fn with_immutable(mut self) -> Self {
        self.is_immutable = true;
        self
    }

    /// Set a source redirect
    #[must_use]
    pub fn with_from(mut self, operation: impl Into<String>, path: impl Into<String>) -> Self {
        self.from = Some(SourceFieldConfig::new(operation, path));
        self
    }

    /// Set a comparison policy
    #[must_use]
    pub fn with_compare(mut self, compare: CompareFieldConfig) -> Self {
        self.compare = Some(compare);
        self
    }

    /// Set a listing column policy
    #[must_use]
    pub fn with_print(mut self, print: PrintFieldConfig) -> Self {
        self.print = Some(print);
        self
    }

    /// Set late-initialization bounds
    #[must_use]
    pub fn with_late_initialize(mut self, min_backoff_seconds: u64, max_backoff_seconds: u64) -> Self {
        self.late_initialize = Some(LateInitializeConfig {
            min_backoff_seconds,
            max_backoff_seconds,
        });
        self
    }

    /// Whether any policy attachment is configured
    #[must_use]
    pub fn has_policy(&self) -> bool {
        self.compare.is_some() || self.print.is_some() || self.late_initialize.is_some()
    }

    /// Names of the policies configured, in a fixed order
    #[must_use]
    pub fn policy_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.compare.is_some() {
            names.push("compare");
        }
        if self.print.is_some() {
            names.push("print");
        }
        if self.late_initialize.is_some() {
            names.push("late_initialize");
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_no_override() {
        let cfg: FieldConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg, FieldConfig::new());
        assert!(!cfg.has_policy());
        assert!(cfg.is_read_only.is_none());
    }

    #[test]
    fn test_full_yaml() {
        let text = r#"
is_read_only: true
is_primary_key: false
from:
  operation: GetFunction
  path: Code.Location
compare:
  nil_equals_zero_value: true
print:
  name: LOCATION
  priority: 1
late_initialize:
  max_backoff_seconds: 60
"#;
        let cfg: FieldConfig = serde_yaml::from_str(text).unwrap();
        assert_eq!(cfg.is_read_only, Some(true));
        assert_eq!(cfg.is_primary_key, Some(false));
        assert_eq!(cfg.from.as_ref().map(SourceFieldConfig::root), Some("Code"));
        assert_eq!(
            cfg.compare,
            Some(CompareFieldConfig {
                is_ignored: false,
                nil_equals_zero_value: true
            })
        );
        let print = cfg.print.clone().unwrap();
        assert_eq!(print.name.as_deref(), Some("LOCATION"));
        assert_eq!(print.index, 0);
        let late = cfg.late_initialize.unwrap();
        assert_eq!(late.min_backoff_seconds, 0);
        assert_eq!(late.max_backoff_seconds, 60);
        assert_eq!(cfg.policy_names(), vec!["compare", "print", "late_initialize"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<FieldConfig, _> = serde_yaml::from_str("is_readonly: true");
        assert!(result.is_err());
    }

    #[test]
    fn test_late_initialize_requires_max() {
        let result: Result<LateInitializeConfig, _> = serde_yaml::from_str("min_backoff_seconds: 5");
        assert!(result.is_err());
    }

    #[test]
    fn test_builders() {
        let cfg = FieldConfig::new()
            .with_from("GetFoo", "Code.Location")
            .with_read_only(true)
            .with_late_initialize(5, 60);
        assert_eq!(cfg.from.unwrap().operation, "GetFoo");
        assert_eq!(cfg.late_initialize.unwrap().min_backoff_seconds, 5);
    }
}
