//! Late-initialization policy.
//!
//! A late-initialized field is filled in from the server after creation
//! when the user left it unset, with retries backing off between the
//! configured bounds.

use serde::{Deserialize, Serialize};
use shapeline_config::FieldConfig;
use shapeline_core::{ResolveError, ResolveResult, Slot};
use std::time::Duration;

/// Retry backoff bounds for late initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LateInitPolicy {
    /// Lower bound in seconds
    pub min_backoff_seconds: u64,
    /// Upper bound in seconds
    pub max_backoff_seconds: u64,
}

impl LateInitPolicy {
    /// Lower bound
    #[must_use]
    pub const fn min_backoff(&self) -> Duration {
        Duration::from_secs(self.min_backoff_seconds)
    }

    /// Upper bound
    #[must_use]
    pub const fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_seconds)
    }
}

/// Attach the late-initialization policy of a field.
///
/// # Errors
///
/// - `InvalidBackoffBounds` if the upper bound is below the lower bound
/// - `ConflictingOverride` if the field is not a Spec field
pub fn attach_late_init_policy(field: &str, slot: Slot, directive: Option<&FieldConfig>) -> ResolveResult<Option<LateInitPolicy>> {
    let Some(late) = directive.and_then(|d| d.late_initialize) else {
        return Ok(None);
    };
    if late.max_backoff_seconds < late.min_backoff_seconds {
        return Err(ResolveError::InvalidBackoffBounds {
            field: field.to_string(),
            min_seconds: late.min_backoff_seconds,
            max_seconds: late.max_backoff_seconds,
        });
    }
    match slot {
        Slot::Spec => {}
        Slot::Status => return Err(ResolveError::conflict(field, "late_initialize on a status field")),
        Slot::Ignored => return Err(ResolveError::conflict(field, "ignored field has a late_initialize policy")),
    }
    Ok(Some(LateInitPolicy {
        min_backoff_seconds: late.min_backoff_seconds,
        max_backoff_seconds: late.max_backoff_seconds,
    }))
}
