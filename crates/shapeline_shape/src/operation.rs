//! API operations.

use crate::types::ShapeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of an operation a shape sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Request shape
    Input,
    /// Response shape
    Output,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// Lifecycle role of an operation within its resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Creates the resource
    Create,
    /// Reads a single resource
    ReadOne,
    /// Lists resources
    ReadMany,
    /// Modifies the resource
    Update,
    /// Deletes the resource
    Delete,
    /// Anything else
    #[default]
    Other,
}

impl OperationKind {
    /// Infer the kind from the operation identifier prefix, e.g.
    /// `CreateFunction`, `GetFunction`, `DescribeRepositories`,
    /// `ListTags`, `UpdateAlias`, `DeleteBucket`
    #[must_use]
    pub fn infer(id: &str) -> Self {
        const PREFIXES: [(&str, OperationKind); 8] = [
            ("Create", OperationKind::Create),
            ("Get", OperationKind::ReadOne),
            ("Describe", OperationKind::ReadOne),
            ("List", OperationKind::ReadMany),
            ("Update", OperationKind::Update),
            ("Modify", OperationKind::Update),
            ("Put", OperationKind::Update),
            ("Delete", OperationKind::Delete),
        ];
        PREFIXES
            .iter()
            .find(|(prefix, _)| {
                id.strip_prefix(prefix)
                    .is_some_and(|rest| rest.chars().next().is_none_or(|c| !c.is_ascii_lowercase()))
            })
            .map_or(Self::Other, |(_, kind)| *kind)
    }

    /// Whether an input member of this operation is user-settable
    #[must_use]
    pub const fn writes_spec(self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }

    /// Whether an output member of this operation describes observed state
    #[must_use]
    pub const fn reports_status(self) -> bool {
        matches!(self, Self::Create | Self::ReadOne | Self::ReadMany | Self::Update)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::ReadOne => "read_one",
            Self::ReadMany => "read_many",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// An API operation with optional input and output shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation identifier, e.g. `CreateFunction`
    pub id: String,
    /// Lifecycle role, inferred from `id` unless set
    pub kind: OperationKind,
    /// Resource this operation belongs to
    pub resource: Option<String>,
    /// Request shape
    pub input: Option<ShapeId>,
    /// Response shape
    pub output: Option<ShapeId>,
}

impl Operation {
    /// Create an operation with no shapes, its kind inferred from `id`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            kind: OperationKind::infer(&id),
            id,
            resource: None,
            input: None,
            output: None,
        }
    }

    /// Override the inferred kind
    #[must_use]
    pub const fn with_kind(mut self, kind: OperationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attach the operation to a resource
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Set the input shape
    #[must_use]
    pub fn with_input(mut self, shape: ShapeId) -> Self {
        self.input = Some(shape);
        self
    }

    /// Set the output shape
    #[must_use]
    pub fn with_output(mut self, shape: ShapeId) -> Self {
        self.output = Some(shape);
        self
    }

    /// Shape for a role
    #[must_use]
    pub const fn shape(&self, role: Role) -> Option<ShapeId> {
        match role {
            Role::Input => self.input,
            Role::Output => self.output,
        }
    }
}
