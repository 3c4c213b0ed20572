//! Provenance-tagged decisions.
//!
//! Each resolved attribute records whether its value came from a naming or
//! lineage heuristic or from an explicit override directive, so precedence
//! can be inspected independently of the classifier's control flow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A decided value together with where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum Decision<T> {
    /// Derived from lineage or naming heuristics
    Heuristic(T),
    /// Set by an override directive
    Explicit(T),
}

impl<T> Decision<T> {
    /// Combine a heuristic value with an optional explicit one.
    ///
    /// The explicit value always wins when present.
    #[must_use]
    pub fn choose(heuristic: T, explicit: Option<T>) -> Self {
        match explicit {
            Some(value) => Self::Explicit(value),
            None => Self::Heuristic(heuristic),
        }
    }

    /// The decided value
    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            Self::Heuristic(v) | Self::Explicit(v) => v,
        }
    }

    /// Consume and return the decided value
    #[must_use]
    pub fn into_value(self) -> T {
        match self {
            Self::Heuristic(v) | Self::Explicit(v) => v,
        }
    }

    /// Whether an override directive produced this value
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }

    /// Transform the value, keeping provenance
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decision<U> {
        match self {
            Self::Heuristic(v) => Decision::Heuristic(f(v)),
            Self::Explicit(v) => Decision::Explicit(f(v)),
        }
    }
}

impl<T: Copy> Decision<T> {
    /// Copy out the decided value
    #[must_use]
    pub fn get(&self) -> T {
        *self.value()
    }
}

impl<T: Default> Default for Decision<T> {
    fn default() -> Self {
        Self::Heuristic(T::default())
    }
}

/// Attributes whose value carries a [`Decision`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Spec/Status/Ignored placement
    Slot,
    /// Primary identifier flag
    PrimaryKey,
    /// Resource ARN flag
    Arn,
    /// Required marker
    Required,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slot => write!(f, "slot"),
            Self::PrimaryKey => write!(f, "is_primary_key"),
            Self::Arn => write!(f, "is_arn"),
            Self::Required => write!(f, "is_required"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_prefers_explicit() {
        assert_eq!(Decision::choose(true, Some(false)), Decision::Explicit(false));
        assert_eq!(Decision::choose(true, None), Decision::Heuristic(true));
    }

    #[test]
    fn test_value_and_provenance() {
        let d = Decision::Explicit(3);
        assert_eq!(d.get(), 3);
        assert!(d.is_explicit());
        assert!(!Decision::Heuristic(3).is_explicit());
    }

    #[test]
    fn test_map_keeps_provenance() {
        let d = Decision::Heuristic(2).map(|v| v * 10);
        assert_eq!(d, Decision::Heuristic(20));
    }

    #[test]
    fn test_serialized_form() {
        let json = serde_json::to_string(&Decision::Explicit(true)).unwrap();
        assert_eq!(json, r#"{"source":"explicit","value":true}"#);
    }
}
