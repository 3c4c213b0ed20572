//! Semantic slot of a resolved field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a field lives on the generated resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// User-settable desired state
    Spec,
    /// Observed state reported by the service
    Status,
    /// Excluded from the generated resource
    Ignored,
}

impl Slot {
    /// Whether the field is user-settable
    #[must_use]
    pub const fn is_spec(self) -> bool {
        matches!(self, Self::Spec)
    }

    /// Whether the field is excluded
    #[must_use]
    pub const fn is_ignored(self) -> bool {
        matches!(self, Self::Ignored)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spec => write!(f, "spec"),
            Self::Status => write!(f, "status"),
            Self::Ignored => write!(f, "ignored"),
        }
    }
}
