//! Resolution diagnostics.
//!
//! Diagnostics are kept in the order they were raised. Because resolution
//! walks fields in declaration order, that order is stable across runs.

use crate::decision::Attribute;
use crate::error::ResolveError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// An explicit directive replaced a default; recorded for auditing
    Info,
    /// A heuristic match was discarded
    Warning,
    /// Generation must not proceed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// What a diagnostic reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Fatal resolution error
    Error {
        /// The underlying error
        error: ResolveError,
    },
    /// An override replaced the heuristic value of an attribute
    HeuristicOverridden {
        /// Attribute affected
        attribute: Attribute,
        /// Value the heuristic produced
        heuristic: String,
        /// Value the override set
        explicit: String,
    },
    /// A singleton heuristic also matched this field but an earlier field won
    HeuristicShadowed {
        /// Attribute affected
        attribute: Attribute,
        /// Field that kept the flag
        winner: String,
    },
    /// A source redirect discarded same-named lineage occurrences
    RedirectShadowsLineage {
        /// Number of discarded occurrences
        occurrences: usize,
    },
    /// A type-ambiguous container was split into its members
    Decomposed {
        /// Names of the flattened fields
        members: Vec<String>,
    },
}

/// A single diagnostic attached to a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Field the diagnostic concerns
    pub field: String,
    /// Diagnostic payload
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Wrap a resolution error
    #[must_use]
    pub fn error(error: ResolveError) -> Self {
        Self {
            field: error.field().to_string(),
            kind: DiagnosticKind::Error { error },
        }
    }

    /// Record an override replacing a heuristic value
    #[must_use]
    pub fn overridden(
        field: impl Into<String>,
        attribute: Attribute,
        heuristic: impl fmt::Display,
        explicit: impl fmt::Display,
    ) -> Self {
        Self {
            field: field.into(),
            kind: DiagnosticKind::HeuristicOverridden {
                attribute,
                heuristic: heuristic.to_string(),
                explicit: explicit.to_string(),
            },
        }
    }

    /// Record a singleton heuristic match that lost to an earlier field
    #[must_use]
    pub fn shadowed(field: impl Into<String>, attribute: Attribute, winner: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: DiagnosticKind::HeuristicShadowed {
                attribute,
                winner: winner.into(),
            },
        }
    }

    /// Severity of this diagnostic
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self.kind {
            DiagnosticKind::Error { .. } => Severity::Error,
            DiagnosticKind::HeuristicShadowed { .. } => Severity::Warning,
            DiagnosticKind::HeuristicOverridden { .. }
            | DiagnosticKind::RedirectShadowsLineage { .. }
            | DiagnosticKind::Decomposed { .. } => Severity::Info,
        }
    }

    /// The error, if this is an error diagnostic
    #[must_use]
    pub fn as_error(&self) -> Option<&ResolveError> {
        match &self.kind {
            DiagnosticKind::Error { error } => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = self.severity();
        match &self.kind {
            DiagnosticKind::Error { error } => write!(f, "{severity}: {error}"),
            DiagnosticKind::HeuristicOverridden {
                attribute,
                heuristic,
                explicit,
            } => write!(
                f,
                "{severity}: {}: {attribute} overridden ({heuristic} -> {explicit})",
                self.field
            ),
            DiagnosticKind::HeuristicShadowed { attribute, winner } => write!(
                f,
                "{severity}: {}: also matches the {attribute} heuristic, kept on {winner}",
                self.field
            ),
            DiagnosticKind::RedirectShadowsLineage { occurrences } => write!(
                f,
                "{severity}: {}: source redirect replaces {occurrences} lineage occurrence(s)",
                self.field
            ),
            DiagnosticKind::Decomposed { members } => write!(
                f,
                "{severity}: {}: decomposed into [{}]",
                self.field,
                members.join(", ")
            ),
        }
    }
}

/// Ordered diagnostic list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Append an error diagnostic
    pub fn push_error(&mut self, error: ResolveError) {
        self.entries.push(Diagnostic::error(error));
    }

    /// Append every diagnostic from another list
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// Whether any diagnostic is an error
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity() == Severity::Error)
    }

    /// Iterate over error payloads
    pub fn errors(&self) -> impl Iterator<Item = &ResolveError> {
        self.entries.iter().filter_map(Diagnostic::as_error)
    }

    /// Iterate over every diagnostic
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Number of diagnostics
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostics at or above a severity
    pub fn at_least(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.severity() >= severity)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_has_errors() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::overridden("Name", Attribute::PrimaryKey, true, false));
        assert!(!diags.has_errors());

        diags.push_error(ResolveError::UnknownField {
            field: "Ghost".to_string(),
        });
        assert!(diags.has_errors());
        assert_eq!(diags.errors().count(), 1);
        assert_eq!(diags.at_least(Severity::Warning).count(), 1);
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::shadowed("FooName", Attribute::PrimaryKey, "Name");
        assert_eq!(
            d.to_string(),
            "warning: FooName: also matches the is_primary_key heuristic, kept on Name"
        );
    }

    #[test]
    fn test_serialized_form() {
        let d = Diagnostic::error(ResolveError::UnknownField {
            field: "Ghost".to_string(),
        });
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["field"], "Ghost");
        assert_eq!(json["kind"], "error");
    }
}
