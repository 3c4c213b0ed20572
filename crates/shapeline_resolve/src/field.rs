//! Resolved field record.

use crate::compare::ComparePolicy;
use crate::late_init::LateInitPolicy;
use crate::present::PresentPolicy;
use crate::reconcile::TypeSource;
use serde::{Deserialize, Serialize};
use shapeline_core::{Decision, Slot};
use shapeline_shape::TypeDescriptor;

/// Everything decided about one field of a resource.
///
/// Every flag that has a heuristic carries a [`Decision`] so consumers can
/// tell whether a value was inferred or configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedField {
    /// Field name
    pub name: String,
    /// Spec, Status or Ignored
    pub slot: Decision<Slot>,
    /// Authoritative type
    pub ty: TypeDescriptor,
    /// Provenance of `ty`
    pub source: TypeSource,
    /// Read and written through the attributes map
    pub is_attribute_unpacked: bool,
    /// Required on create
    pub is_required: Decision<bool>,
    /// Resource primary key
    pub is_primary_key: Decision<bool>,
    /// Resource ARN
    pub is_arn: Decision<bool>,
    /// Owning account identifier
    pub is_owner_account_id: bool,
    /// Value must not be logged or printed
    pub is_secret: bool,
    /// Value cannot change after creation
    pub is_immutable: bool,
    /// Comparison policy
    pub compare: ComparePolicy,
    /// Listing column, if printed
    pub present: Option<PresentPolicy>,
    /// Late initialization, if enabled
    pub late_init: Option<LateInitPolicy>,
}

impl ResolvedField {
    /// Field with the given slot and type and every other decision at its
    /// heuristic default
    #[must_use]
    pub fn new(name: &str, slot: Decision<Slot>, ty: TypeDescriptor, source: TypeSource) -> Self {
        Self {
            name: name.to_string(),
            slot,
            ty,
            source,
            is_attribute_unpacked: false,
            is_required: Decision::Heuristic(false),
            is_primary_key: Decision::Heuristic(false),
            is_arn: Decision::Heuristic(false),
            is_owner_account_id: false,
            is_secret: false,
            is_immutable: false,
            compare: ComparePolicy::default(),
            present: None,
            late_init: None,
        }
    }

    /// Current slot
    #[must_use]
    pub fn slot(&self) -> Slot {
        self.slot.get()
    }

    /// Whether the field is printed as a listing column
    #[must_use]
    pub fn is_printed(&self) -> bool {
        self.present.is_some()
    }
}
