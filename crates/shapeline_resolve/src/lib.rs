//! shapeline resolver
//!
//! Decides, for every field name appearing across a resource's operations,
//! which slot it occupies, what type it carries and which comparison,
//! listing and late-initialization policies apply to it.
//!
//! Stages run in a fixed order:
//! lineage → type reconciliation → classification → attribute unpacking →
//! policy attachment. The [`Resolver`] drives them and either returns a
//! complete [`Resolution`] or a [`ResolveFailure`] carrying every error.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attribute;
pub mod classify;
pub mod compare;
pub mod field;
pub mod late_init;
pub mod lineage;
pub mod present;
pub mod reconcile;
pub mod resolver;

pub use compare::ComparePolicy;
pub use field::ResolvedField;
pub use late_init::LateInitPolicy;
pub use lineage::{FieldOccurrence, Lineage};
pub use present::{Column, ColumnPlan, ColumnSource, PresentPolicy, PresentTier};
pub use reconcile::{ReconciledType, TypeSource};
pub use resolver::{Resolution, ResolveFailure, Resolver};

#[cfg(test)]
pub(crate) mod testing;
