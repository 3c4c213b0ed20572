//! Type reconciliation.
//!
//! Picks the single authoritative type of a field. Divergent same-named
//! types are an error unless a source redirect names the member to use.

use crate::lineage::FieldOccurrence;
use serde::{Deserialize, Serialize};
use shapeline_config::FieldConfig;
use shapeline_core::{ResolveError, ResolveResult};
use shapeline_shape::{Role, ShapeGraph, TypeDescriptor};

/// Where a field's type came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeSource {
    /// All lineage occurrences agree
    Lineage,
    /// Taken from the member at `operation`/`path`
    Redirect {
        /// Redirect operation
        operation: String,
        /// Redirect path
        path: String,
        /// Side of the operation the path was found on
        role: Role,
    },
    /// Value lives in the attributes map
    Attribute,
}

/// Outcome of reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledType {
    /// Authoritative type
    pub ty: TypeDescriptor,
    /// Provenance of the type
    pub source: TypeSource,
}

/// Distinct types among occurrences, by structural equivalence, in order
#[must_use]
pub fn distinct_types<'o>(graph: &ShapeGraph, occurrences: &'o [FieldOccurrence]) -> Vec<&'o TypeDescriptor> {
    let mut distinct: Vec<&TypeDescriptor> = Vec::new();
    for occ in occurrences {
        if !distinct.iter().any(|t| graph.equivalent(t, &occ.ty)) {
            distinct.push(&occ.ty);
        }
    }
    distinct
}

/// Whether occurrences disagree on type
#[must_use]
pub fn is_ambiguous(graph: &ShapeGraph, occurrences: &[FieldOccurrence]) -> bool {
    distinct_types(graph, occurrences).len() > 1
}

/// Decide the single type of `field`.
///
/// # Errors
///
/// - `BadSourceRedirect` if the redirect operation or path does not resolve
/// - `UnknownField` if there are no occurrences and nothing else supplies a type
/// - `TypeAmbiguity` if occurrences disagree and no redirect is configured
pub fn reconcile_type(
    graph: &ShapeGraph,
    field: &str,
    occurrences: &[FieldOccurrence],
    directive: Option<&FieldConfig>,
) -> ResolveResult<ReconciledType> {
    if let Some(from) = directive.and_then(|d| d.from.as_ref()) {
        let target = graph
            .resolve_path(&from.operation, &from.path)
            .map_err(|e| ResolveError::BadSourceRedirect {
                field: field.to_string(),
                operation: from.operation.clone(),
                path: from.path.clone(),
                reason: e.to_string(),
            })?;
        return Ok(ReconciledType {
            ty: target.member.ty.clone(),
            source: TypeSource::Redirect {
                operation: from.operation.clone(),
                path: from.path.clone(),
                role: target.role,
            },
        });
    }

    let is_attribute = directive.is_some_and(|d| d.is_attribute);
    let distinct = distinct_types(graph, occurrences);
    match distinct.as_slice() {
        [ty] => Ok(ReconciledType {
            ty: (*ty).clone(),
            source: TypeSource::Lineage,
        }),
        _ if is_attribute => Ok(ReconciledType {
            ty: TypeDescriptor::string(),
            source: TypeSource::Attribute,
        }),
        [] => Err(ResolveError::UnknownField {
            field: field.to_string(),
        }),
        types => Err(ResolveError::TypeAmbiguity {
            field: field.to_string(),
            types: types.iter().map(|t| graph.render(t)).collect(),
        }),
    }
}
