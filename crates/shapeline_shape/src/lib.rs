//! shapeline shape graph
//!
//! An immutable arena of named shapes and the operations that reference
//! them. Shapes refer to each other by [`ShapeId`] index, never by pointer,
//! so recursive shapes need no special ownership handling.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod graph;
pub mod operation;
pub mod shape;
pub mod types;

pub use document::{GraphDocument, MemberDocument, OperationDocument, ShapeDocument, TypeSpec};
pub use error::{GraphError, PathError};
pub use graph::{GraphBuilder, PathTarget, ShapeGraph};
pub use operation::{Operation, OperationKind, Role};
pub use shape::{Member, Shape};
pub use types::{ScalarKind, ShapeId, TypeDescriptor};
