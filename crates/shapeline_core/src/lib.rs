//! shapeline core types
//!
//! Pure types shared by every stage of field resolution. No I/O, no
//! dependency on the shape graph or the configuration format.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decision;
pub mod diagnostic;
pub mod error;
pub mod slot;

// Re-exports
pub use decision::{Attribute, Decision};
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use error::{ResolveError, ResolveResult};
pub use slot::Slot;
