//! The shape graph arena.
//!
//! Shapes live in a `Vec` indexed by [`ShapeId`]; a name index and the
//! operation table are `IndexMap`s so every iteration follows declaration
//! order.

use crate::error::{GraphError, PathError};
use crate::operation::{Operation, Role};
use crate::shape::{Member, Shape};
use crate::types::{ShapeId, TypeDescriptor};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Immutable graph of shapes and operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeGraph {
    shapes: Vec<Shape>,
    index: IndexMap<String, ShapeId>,
    operations: IndexMap<String, Operation>,
}

/// Member reached by following a path inside an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathTarget<'g> {
    /// Side of the operation the path was found on
    pub role: Role,
    /// The member at the end of the path
    pub member: &'g Member,
}

impl ShapeGraph {
    /// Shape by id
    ///
    /// Ids are only handed out by the builder that produced this graph.
    #[must_use]
    pub fn shape(&self, id: ShapeId) -> &Shape {
        &self.shapes[id.index()]
    }

    /// Shape id by name
    #[must_use]
    pub fn shape_id(&self, name: &str) -> Option<ShapeId> {
        self.index.get(name).copied()
    }

    /// Operation by identifier
    #[must_use]
    pub fn operation(&self, id: &str) -> Option<&Operation> {
        self.operations.get(id)
    }

    /// All operations in declaration order
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    /// Operations attached to a resource, in declaration order
    pub fn resource_operations<'a>(&'a self, resource: &'a str) -> impl Iterator<Item = &'a Operation> + 'a {
        self.operations
            .values()
            .filter(move |op| op.resource.as_deref() == Some(resource))
    }

    /// Distinct resource names in order of first appearance
    #[must_use]
    pub fn resources(&self) -> Vec<&str> {
        let set: IndexSet<&str> = self
            .operations
            .values()
            .filter_map(|op| op.resource.as_deref())
            .collect();
        set.into_iter().collect()
    }

    /// Number of shapes
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Structural type equivalence.
    ///
    /// Structures are equal when they have the same member names with
    /// equivalent types, regardless of shape name or member order.
    /// Recursive shapes are compared coinductively.
    #[must_use]
    pub fn equivalent(&self, a: &TypeDescriptor, b: &TypeDescriptor) -> bool {
        let mut assumed = Vec::new();
        self.equivalent_inner(a, b, &mut assumed)
    }

    fn equivalent_inner(
        &self,
        a: &TypeDescriptor,
        b: &TypeDescriptor,
        assumed: &mut Vec<(ShapeId, ShapeId)>,
    ) -> bool {
        match (a, b) {
            (TypeDescriptor::Scalar(x), TypeDescriptor::Scalar(y)) => x == y,
            (TypeDescriptor::List(x), TypeDescriptor::List(y))
            | (TypeDescriptor::Map(x), TypeDescriptor::Map(y)) => self.equivalent_inner(x, y, assumed),
            (TypeDescriptor::Structure(x), TypeDescriptor::Structure(y)) => {
                if x == y || assumed.contains(&(*x, *y)) {
                    return true;
                }
                assumed.push((*x, *y));
                let left = self.shape(*x);
                let right = self.shape(*y);
                left.members.len() == right.members.len()
                    && left.members.iter().all(|lm| {
                        right
                            .member(&lm.name)
                            .is_some_and(|rm| self.equivalent_inner(&lm.ty, &rm.ty, assumed))
                    })
            }
            _ => false,
        }
    }

    /// Render a type for diagnostics
    #[must_use]
    pub fn render(&self, ty: &TypeDescriptor) -> String {
        match ty {
            TypeDescriptor::Scalar(kind) => kind.to_string(),
            TypeDescriptor::List(inner) => format!("[]{}", self.render(inner)),
            TypeDescriptor::Map(inner) => format!("map[string]{}", self.render(inner)),
            TypeDescriptor::Structure(id) => self.shape(*id).name.clone(),
        }
    }

    /// Follow a dot-separated member path inside an operation.
    ///
    /// The output shape is searched first, then the input shape. When
    /// neither contains the path, the error from the first shape tried is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns error if the operation does not exist or a segment cannot be
    /// followed.
    pub fn resolve_path(&self, operation: &str, path: &str) -> Result<PathTarget<'_>, PathError> {
        let op = self
            .operation(operation)
            .ok_or_else(|| PathError::UnknownOperation(operation.to_string()))?;
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(PathError::EmptySegment(path.to_string()));
        }

        let mut first_error = None;
        for role in [Role::Output, Role::Input] {
            let Some(root) = op.shape(role) else {
                continue;
            };
            match self.walk(root, &segments) {
                Ok(member) => return Ok(PathTarget { role, member }),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        Err(first_error.unwrap_or_else(|| PathError::NoShapes(operation.to_string())))
    }

    fn walk(&self, root: ShapeId, segments: &[&str]) -> Result<&Member, PathError> {
        let mut shape = self.shape(root);
        let mut current: Option<&Member> = None;
        for segment in segments {
            if let Some(parent) = current {
                let id = parent.ty.as_structure().ok_or_else(|| PathError::NotAStructure {
                    member: parent.name.clone(),
                    segment: (*segment).to_string(),
                })?;
                shape = self.shape(id);
            }
            let member = shape.member(segment).ok_or_else(|| PathError::MissingMember {
                shape: shape.name.clone(),
                segment: (*segment).to_string(),
            })?;
            current = Some(member);
        }
        current.ok_or_else(|| PathError::EmptySegment(String::new()))
    }
}

/// Builder for a [`ShapeGraph`].
///
/// Shapes may be referenced before they are defined; `build` fails if any
/// referenced shape was never defined.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    shapes: Vec<Option<Shape>>,
    index: IndexMap<String, ShapeId>,
    referrers: IndexMap<ShapeId, String>,
    operations: IndexMap<String, Operation>,
}

impl GraphBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for a shape name, reserving a slot if it is not yet known
    pub fn reference(&mut self, name: &str, referrer: &str) -> ShapeId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }
        let id = self.reserve(name);
        self.referrers.insert(id, referrer.to_string());
        id
    }

    fn reserve(&mut self, name: &str) -> ShapeId {
        let id = ShapeId::new(self.shapes.len() as u32);
        self.shapes.push(None);
        self.index.insert(name.to_string(), id);
        id
    }

    /// Define a shape
    ///
    /// # Errors
    ///
    /// Returns error if the shape is already defined or repeats a member name
    pub fn add_shape(&mut self, shape: Shape) -> Result<ShapeId, GraphError> {
        let mut seen = IndexSet::new();
        for member in &shape.members {
            if !seen.insert(member.name.as_str()) {
                return Err(GraphError::DuplicateMember {
                    shape: shape.name.clone(),
                    member: member.name.clone(),
                });
            }
        }

        let id = match self.index.get(&shape.name) {
            Some(id) if self.shapes[id.index()].is_some() => {
                return Err(GraphError::DuplicateShape { name: shape.name });
            }
            Some(id) => *id,
            None => self.reserve(&shape.name),
        };
        self.shapes[id.index()] = Some(shape);
        Ok(id)
    }

    /// Add an operation
    ///
    /// # Errors
    ///
    /// Returns error if an operation with the same id exists
    pub fn add_operation(&mut self, operation: Operation) -> Result<(), GraphError> {
        if self.operations.contains_key(&operation.id) {
            return Err(GraphError::DuplicateOperation { id: operation.id });
        }
        self.operations.insert(operation.id.clone(), operation);
        Ok(())
    }

    /// Finish the graph
    ///
    /// # Errors
    ///
    /// Returns error if a referenced shape was never defined
    pub fn build(self) -> Result<ShapeGraph, GraphError> {
        let mut shapes = Vec::with_capacity(self.shapes.len());
        for (name, id) in &self.index {
            match &self.shapes[id.index()] {
                Some(_) => {}
                None => {
                    return Err(GraphError::UnknownShape {
                        name: name.clone(),
                        referrer: self.referrers.get(id).cloned().unwrap_or_default(),
                    });
                }
            }
        }
        shapes.extend(self.shapes.into_iter().flatten());

        tracing::debug!(
            shapes = shapes.len(),
            operations = self.operations.len(),
            "shape graph built"
        );

        Ok(ShapeGraph {
            shapes,
            index: self.index,
            operations: self.operations,
        })
    }
}
