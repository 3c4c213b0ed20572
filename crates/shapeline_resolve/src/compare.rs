//! Comparison policy.

use serde::{Deserialize, Serialize};
use shapeline_config::FieldConfig;
use shapeline_core::{ResolveError, ResolveResult, Slot};

/// How two resource instances are compared on a field.
///
/// The default treats an absent value as different from a present zero
/// value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComparePolicy {
    /// Field never contributes to a difference
    pub ignored: bool,
    /// Absent and zero value compare equal
    pub nil_equals_zero: bool,
}

impl ComparePolicy {
    /// Whether two optional values differ under this policy
    #[must_use]
    pub fn values_differ<T: PartialEq + Default>(&self, a: Option<&T>, b: Option<&T>) -> bool {
        if self.ignored {
            return false;
        }
        if self.nil_equals_zero {
            let zero = T::default();
            return a.unwrap_or(&zero) != b.unwrap_or(&zero);
        }
        a != b
    }
}

/// Attach the comparison policy of a field.
///
/// # Errors
///
/// Returns `ConflictingOverride` if an ignored field carries a compare
/// directive.
pub fn attach_compare_policy(field: &str, slot: Slot, directive: Option<&FieldConfig>) -> ResolveResult<ComparePolicy> {
    let Some(compare) = directive.and_then(|d| d.compare) else {
        return Ok(ComparePolicy::default());
    };
    if slot == Slot::Ignored {
        return Err(ResolveError::conflict(field, "ignored field has a compare policy"));
    }
    Ok(ComparePolicy {
        ignored: compare.is_ignored,
        nil_equals_zero: compare.nil_equals_zero_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeline_config::CompareFieldConfig;

    #[test]
    fn test_default_policy() {
        let policy = ComparePolicy::default();
        assert!(policy.values_differ(None, Some(&0)));
        assert!(policy.values_differ(Some(&1), Some(&2)));
        assert!(!policy.values_differ(Some(&"a"), Some(&"a")));
        assert!(!policy.values_differ::<i32>(None, None));
    }

    #[test]
    fn test_nil_equals_zero() {
        let policy = ComparePolicy {
            ignored: false,
            nil_equals_zero: true,
        };
        assert!(!policy.values_differ(None, Some(&0)));
        assert!(!policy.values_differ(Some(&String::new()), None));
        assert!(policy.values_differ(None, Some(&5)));
    }

    #[test]
    fn test_ignored_never_differs() {
        let policy = ComparePolicy {
            ignored: true,
            nil_equals_zero: true,
        };
        assert!(!policy.values_differ(Some(&1), Some(&2)));
    }

    #[test]
    fn test_attach() {
        let cfg = FieldConfig::new().with_compare(CompareFieldConfig {
            is_ignored: true,
            nil_equals_zero_value: true,
        });
        let policy = attach_compare_policy("Tags", Slot::Spec, Some(&cfg)).unwrap();
        assert!(policy.ignored && policy.nil_equals_zero);

        assert_eq!(attach_compare_policy("Tags", Slot::Spec, None).unwrap(), ComparePolicy::default());
        assert!(matches!(
            attach_compare_policy("Tags", Slot::Ignored, Some(&cfg)),
            Err(ResolveError::ConflictingOverride { .. })
        ));
    }
}
