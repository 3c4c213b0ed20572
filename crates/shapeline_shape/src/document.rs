//! Serialized form of an already-parsed shape graph.
//!
//! The document is what an upstream API-model parser hands over. It names
//! shapes instead of indexing them; [`GraphDocument::into_graph`] interns
//! names into the arena.

use crate::error::GraphError;
use crate::graph::{GraphBuilder, ShapeGraph};
use crate::operation::{Operation, OperationKind};
use crate::shape::{Member, Shape};
use crate::types::{ScalarKind, TypeDescriptor};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Member type as written in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSpec {
    /// `string`, `integer`, ...
    Scalar(ScalarKind),
    /// `{ list: <type> }`
    List {
        /// Element type
        list: Box<TypeSpec>,
    },
    /// `{ map: <type> }`
    Map {
        /// Value type
        map: Box<TypeSpec>,
    },
    /// `{ structure: ShapeName }`
    Structure {
        /// Referenced shape name
        structure: String,
    },
}

/// Member entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberDocument {
    /// Member name
    pub name: String,
    /// Member type
    #[serde(rename = "type")]
    pub ty: TypeSpec,
    /// Required flag
    #[serde(default)]
    pub required: bool,
}

/// Shape entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShapeDocument {
    /// Members in declaration order
    #[serde(default)]
    pub members: Vec<MemberDocument>,
}

/// Operation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationDocument {
    /// Operation identifier
    pub id: String,
    /// Lifecycle role; inferred from `id` when absent
    #[serde(default)]
    pub kind: Option<OperationKind>,
    /// Owning resource
    #[serde(default)]
    pub resource: Option<String>,
    /// Input shape name
    #[serde(default)]
    pub input: Option<String>,
    /// Output shape name
    #[serde(default)]
    pub output: Option<String>,
}

/// Whole graph document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphDocument {
    /// Shapes by name, in declaration order
    #[serde(default)]
    pub shapes: IndexMap<String, ShapeDocument>,
    /// Operations in declaration order
    #[serde(default)]
    pub operations: Vec<OperationDocument>,
}

impl GraphDocument {
    /// Decode from YAML
    ///
    /// # Errors
    ///
    /// Returns error if the text is not a valid graph document
    pub fn from_yaml_str(text: &str) -> Result<Self, GraphError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Decode from JSON
    ///
    /// # Errors
    ///
    /// Returns error if the text is not a valid graph document
    pub fn from_json_str(text: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a document; `.json` files are decoded as JSON, anything else as YAML
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or decoded
    pub fn load(path: &Path) -> Result<Self, GraphError> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }

    /// Intern the document into a [`ShapeGraph`]
    ///
    /// # Errors
    ///
    /// Returns error on duplicate names or references to undefined shapes
    pub fn into_graph(self) -> Result<ShapeGraph, GraphError> {
        let mut builder = GraphBuilder::new();

        for (name, doc) in self.shapes {
            let mut shape = Shape::new(name.clone());
            for member in doc.members {
                let referrer = format!("{}.{}", name, member.name);
                let ty = intern(&mut builder, &member.ty, &referrer);
                shape.members.push(Member {
                    name: member.name,
                    ty,
                    required: member.required,
                });
            }
            builder.add_shape(shape)?;
        }

        for op in self.operations {
            let mut operation = Operation::new(op.id.clone());
            if let Some(kind) = op.kind {
                operation.kind = kind;
            }
            operation.resource = op.resource;
            if let Some(input) = op.input {
                operation.input = Some(builder.reference(&input, &op.id));
            }
            if let Some(output) = op.output {
                operation.output = Some(builder.reference(&output, &op.id));
            }
            builder.add_operation(operation)?;
        }

        builder.build()
    }
}

fn intern(builder: &mut GraphBuilder, spec: &TypeSpec, referrer: &str) -> TypeDescriptor {
    match spec {
        TypeSpec::Scalar(kind) => TypeDescriptor::Scalar(*kind),
        TypeSpec::List { list } => TypeDescriptor::list(intern(builder, list, referrer)),
        TypeSpec::Map { map } => TypeDescriptor::map(intern(builder, map, referrer)),
        TypeSpec::Structure { structure } => TypeDescriptor::Structure(builder.reference(structure, referrer)),
    }
}
