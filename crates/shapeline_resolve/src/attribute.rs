//! Attribute unpacking.
//!
//! Some services carry real fields inside a generic `map[string]string`
//! "Attributes" member. Such fields are always strings on the resource and
//! are read through map lookups instead of direct member access.

use crate::field::ResolvedField;
use shapeline_shape::TypeDescriptor;

/// Fix an attribute field to the scalar string type and flag it for map
/// accessors. Fields without the attribute directive are left unchanged;
/// the slot is never touched.
pub fn apply_attribute_unpacking(field: &mut ResolvedField, is_attribute: bool) {
    if !is_attribute {
        return;
    }
    if !field.ty.is_string() {
        tracing::debug!(field = %field.name, "attribute field forced to string");
    }
    field.ty = TypeDescriptor::string();
    field.is_attribute_unpacked = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::TypeSource;
    use shapeline_core::{Decision, Slot};
    use shapeline_shape::{ScalarKind, ShapeId};

    #[test]
    fn test_structured_type_forced_to_string() {
        let mut field = ResolvedField::new(
            "Policy",
            Decision::Heuristic(Slot::Spec),
            TypeDescriptor::Structure(ShapeId::new(3)),
            TypeSource::Lineage,
        );
        apply_attribute_unpacking(&mut field, true);
        assert!(field.ty.is_string());
        assert!(field.is_attribute_unpacked);
        assert_eq!(field.slot, Decision::Heuristic(Slot::Spec));
    }

    #[test]
    fn test_non_attribute_untouched() {
        let mut field = ResolvedField::new(
            "Timeout",
            Decision::Heuristic(Slot::Spec),
            TypeDescriptor::Scalar(ScalarKind::Integer),
            TypeSource::Lineage,
        );
        apply_attribute_unpacking(&mut field, false);
        assert_eq!(field.ty, TypeDescriptor::Scalar(ScalarKind::Integer));
        assert!(!field.is_attribute_unpacked);
    }
}
