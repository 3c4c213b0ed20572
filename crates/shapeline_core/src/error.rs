//! Resolution error taxonomy.
//!
//! Every variant is fatal to a generation run. Errors are detected while
//! resolving, never deferred to code emission.

use serde::{Deserialize, Serialize};

/// Resolution result type
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Resolution error
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum ResolveError {
    /// An override names a field with no lineage and no way to derive a type
    #[error("unknown field {field}: no operation shape declares it and no source redirect is configured")]
    UnknownField {
        /// Field name
        field: String,
    },

    /// Same-named members disagree on type and nothing disambiguates them
    #[error("type ambiguity for field {field}: occurrences have divergent types [{}]", types.join(", "))]
    TypeAmbiguity {
        /// Field name
        field: String,
        /// Distinct rendered types in declaration order
        types: Vec<String>,
    },

    /// A source redirect names an operation or path that does not exist
    #[error("bad source redirect for field {field} ({operation}:{path}): {reason}")]
    BadSourceRedirect {
        /// Field name
        field: String,
        /// Redirect operation
        operation: String,
        /// Redirect member path
        path: String,
        /// What failed to resolve
        reason: String,
    },

    /// Mutually exclusive directives are set together
    #[error("conflicting override for field {field}: {reason}")]
    ConflictingOverride {
        /// Field name
        field: String,
        /// Description of the conflict
        reason: String,
    },

    /// Late-initialization backoff bounds are inverted
    #[error("invalid backoff bounds for field {field}: max {max_seconds}s < min {min_seconds}s")]
    InvalidBackoffBounds {
        /// Field name
        field: String,
        /// Configured minimum
        min_seconds: u64,
        /// Configured maximum
        max_seconds: u64,
    },
}

impl ResolveError {
    /// Field the error is attached to
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownField { field }
            | Self::TypeAmbiguity { field, .. }
            | Self::BadSourceRedirect { field, .. }
            | Self::ConflictingOverride { field, .. }
            | Self::InvalidBackoffBounds { field, .. } => field,
        }
    }

    /// Build a conflicting-override error
    #[must_use]
    pub fn conflict(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConflictingOverride {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResolveError::UnknownField {
            field: "Missing".to_string(),
        };
        assert!(err.to_string().starts_with("unknown field Missing"));

        let err = ResolveError::TypeAmbiguity {
            field: "Code".to_string(),
            types: vec!["FooCode".to_string(), "FooCodeLocation".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "type ambiguity for field Code: occurrences have divergent types [FooCode, FooCodeLocation]"
        );
    }

    #[test]
    fn test_backoff_error_display() {
        let err = ResolveError::InvalidBackoffBounds {
            field: "State".to_string(),
            min_seconds: 30,
            max_seconds: 5,
        };
        let s = err.to_string();
        assert!(s.contains("max 5s"));
        assert!(s.contains("min 30s"));
    }

    #[test]
    fn test_error_field() {
        let err = ResolveError::conflict("Tags", "ignored field with print policy");
        assert_eq!(err.field(), "Tags");
        assert!(matches!(err, ResolveError::ConflictingOverride { .. }));
    }
}
