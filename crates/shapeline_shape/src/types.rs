//! Type descriptors for shape members.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a shape inside a [`crate::ShapeGraph`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(u32);

impl ShapeId {
    /// Create from an arena index
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Arena index
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape_{}", self.0)
    }
}

/// Scalar member types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    /// UTF-8 string
    String,
    /// 32-bit integer
    Integer,
    /// 64-bit integer
    Long,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Boolean
    Boolean,
    /// Timestamp
    Timestamp,
    /// Opaque bytes
    Blob,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Blob => "blob",
        };
        f.write_str(name)
    }
}

/// Type of a shape member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// Scalar value
    Scalar(ScalarKind),
    /// Homogeneous list
    List(Box<TypeDescriptor>),
    /// String-keyed map
    Map(Box<TypeDescriptor>),
    /// Reference to a structure shape
    Structure(ShapeId),
}

impl TypeDescriptor {
    /// The scalar string type
    #[must_use]
    pub const fn string() -> Self {
        Self::Scalar(ScalarKind::String)
    }

    /// List of `element`
    #[must_use]
    pub fn list(element: TypeDescriptor) -> Self {
        Self::List(Box::new(element))
    }

    /// Map from string to `value`
    #[must_use]
    pub fn map(value: TypeDescriptor) -> Self {
        Self::Map(Box::new(value))
    }

    /// Structure shape, if this is one
    #[must_use]
    pub const fn as_structure(&self) -> Option<ShapeId> {
        match self {
            Self::Structure(id) => Some(*id),
            _ => None,
        }
    }

    /// Whether this is the scalar string type
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::Scalar(ScalarKind::String))
    }
}
