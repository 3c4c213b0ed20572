//! Field lineage: every place a field name occurs across a resource's
//! operations.
//!
//! Occurrences are collected in declaration order: operations in graph
//! order, input members before output members, members in shape order.
//! A field's position in the lineage is its first occurrence, and that
//! position is what the singleton heuristics treat as "first".

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shapeline_shape::{Operation, OperationKind, Role, ShapeGraph, TypeDescriptor};

/// One appearance of a field name in an operation shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOccurrence {
    /// Operation identifier
    pub operation: String,
    /// Lifecycle role of the operation
    pub kind: OperationKind,
    /// Input or output side
    pub role: Role,
    /// Member path inside the shape, e.g. `Name` or `Code.ImageUri`
    pub member_path: String,
    /// Member type
    pub ty: TypeDescriptor,
    /// Member required flag
    pub required: bool,
}

/// Which sides a field was seen on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Candidate {
    /// Only in input shapes
    InputOnly,
    /// Only in output shapes
    OutputOnly,
    /// In both
    Both,
}

/// Field name → occurrences, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lineage {
    fields: IndexMap<String, Vec<FieldOccurrence>>,
}

impl Lineage {
    /// Create an empty lineage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an occurrence
    pub fn record(&mut self, field: impl Into<String>, occurrence: FieldOccurrence) {
        self.fields.entry(field.into()).or_default().push(occurrence);
    }

    /// Occurrences of a field; empty if the field never occurs
    #[must_use]
    pub fn occurrences(&self, field: &str) -> &[FieldOccurrence] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether the field occurs anywhere
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of distinct field names
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field was seen
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Which sides the field appears on
    #[must_use]
    pub fn candidate(&self, field: &str) -> Option<Candidate> {
        candidate_of(self.occurrences(field))
    }

    /// Replace a structure-typed field by its members.
    ///
    /// Every member of every structure occurrence of `root` becomes an
    /// occurrence of `{root}{member}`, keeping the original operation and
    /// role. New names take the root's position; names that already exist
    /// absorb the new occurrences. Returns the flattened names, or `None`
    /// if `root` is unknown or any occurrence is not a structure.
    pub fn decompose(&mut self, graph: &ShapeGraph, root: &str) -> Option<Vec<String>> {
        let occurrences = self.fields.get(root)?;
        if occurrences.iter().any(|o| o.ty.as_structure().is_none()) {
            return None;
        }

        let mut flattened: IndexMap<String, Vec<FieldOccurrence>> = IndexMap::new();
        for occ in occurrences {
            let Some(shape_id) = occ.ty.as_structure() else {
                continue;
            };
            for member in &graph.shape(shape_id).members {
                flattened
                    .entry(format!("{}{}", root, member.name))
                    .or_default()
                    .push(FieldOccurrence {
                        operation: occ.operation.clone(),
                        kind: occ.kind,
                        role: occ.role,
                        member_path: format!("{}.{}", occ.member_path, member.name),
                        ty: member.ty.clone(),
                        required: member.required,
                    });
            }
        }

        let mut position = self.fields.get_index_of(root)?;
        self.fields.shift_remove(root);

        let names: Vec<String> = flattened.keys().cloned().collect();
        for (name, occs) in flattened {
            match self.fields.get_mut(&name) {
                Some(existing) => existing.extend(occs),
                None => {
                    self.fields.shift_insert(position, name, occs);
                    position += 1;
                }
            }
        }
        Some(names)
    }
}

/// Which sides a list of occurrences covers
#[must_use]
pub fn candidate_of(occurrences: &[FieldOccurrence]) -> Option<Candidate> {
    let input = occurrences.iter().any(|o| o.role == Role::Input);
    let output = occurrences.iter().any(|o| o.role == Role::Output);
    match (input, output) {
        (true, true) => Some(Candidate::Both),
        (true, false) => Some(Candidate::InputOnly),
        (false, true) => Some(Candidate::OutputOnly),
        (false, false) => None,
    }
}

/// Collect the lineage of every top-level member across `operations`
#[must_use]
pub fn resolve_lineage<'g>(graph: &ShapeGraph, operations: impl IntoIterator<Item = &'g Operation>) -> Lineage {
    let mut lineage = Lineage::new();
    for op in operations {
        for role in [Role::Input, Role::Output] {
            let Some(shape_id) = op.shape(role) else {
                continue;
            };
            for member in &graph.shape(shape_id).members {
                lineage.record(
                    member.name.clone(),
                    FieldOccurrence {
                        operation: op.id.clone(),
                        kind: op.kind,
                        role,
                        member_path: member.name.clone(),
                        ty: member.ty.clone(),
                        required: member.required,
                    },
                );
            }
        }
    }
    tracing::debug!(fields = lineage.len(), "lineage collected");
    lineage
}
