//! Field classification.
//!
//! Slot precedence, highest first:
//! 1. the resource's `ignore` list
//! 2. explicit `is_read_only`
//! 3. a source redirect (Status unless `is_read_only: false`)
//! 4. lineage: a Create or Update input occurrence means Spec, otherwise a
//!    Create, read or Update output occurrence means Status; a field seen
//!    only in List, Delete or other operation inputs is Ignored
//!
//! The singleton flags `is_primary_key` and `is_arn` are decided across the
//! whole resource: the first field in declaration order whose name matches
//! the pattern wins, unless an explicit override names a field.

use crate::lineage::FieldOccurrence;
use indexmap::IndexMap;
use shapeline_config::FieldConfig;
use shapeline_core::{Attribute, Decision, Diagnostic, Diagnostics, ResolveError, Slot};
use shapeline_shape::{OperationKind, Role};

/// Slot implied by lineage alone
#[must_use]
pub fn heuristic_slot(occurrences: &[FieldOccurrence]) -> Slot {
    if occurrences.is_empty() || occurrences.iter().any(|o| o.role == Role::Input && o.kind.writes_spec()) {
        Slot::Spec
    } else if occurrences
        .iter()
        .any(|o| o.role == Role::Output && o.kind.reports_status())
    {
        Slot::Status
    } else {
        Slot::Ignored
    }
}

/// Decide the slot of a field
#[must_use]
pub fn classify(occurrences: &[FieldOccurrence], directive: Option<&FieldConfig>, ignored: bool) -> Decision<Slot> {
    if ignored {
        return Decision::Explicit(Slot::Ignored);
    }
    let heuristic = heuristic_slot(occurrences);
    let Some(directive) = directive else {
        return Decision::Heuristic(heuristic);
    };
    match (directive.is_read_only, directive.from.is_some()) {
        (Some(true), _) | (None, true) => Decision::Explicit(Slot::Status),
        (Some(false), true) => Decision::Explicit(Slot::Spec),
        (Some(false) | None, false) => Decision::Heuristic(heuristic),
    }
}

/// Required marker: any required Create input occurrence, unless overridden
#[must_use]
pub fn classify_required(occurrences: &[FieldOccurrence], directive: Option<&FieldConfig>) -> Decision<bool> {
    let heuristic = occurrences
        .iter()
        .any(|o| o.role == Role::Input && o.kind == OperationKind::Create && o.required);
    Decision::choose(heuristic, directive.and_then(|d| d.is_required))
}

/// Per-field directive combinations that cannot hold together
#[must_use]
pub fn flag_conflicts(field: &str, slot: Slot, directive: Option<&FieldConfig>) -> Vec<ResolveError> {
    let mut errors = Vec::new();
    let Some(directive) = directive else {
        return errors;
    };

    if slot == Slot::Ignored {
        if directive.from.is_some() {
            errors.push(ResolveError::conflict(field, "ignored field has a source redirect"));
        }
        if directive.is_primary_key == Some(true) {
            errors.push(ResolveError::conflict(field, "ignored field is the primary key"));
        }
        if directive.is_arn == Some(true) {
            errors.push(ResolveError::conflict(field, "ignored field is the ARN"));
        }
        if directive.is_owner_account_id {
            errors.push(ResolveError::conflict(field, "ignored field is the owner account id"));
        }
    }
    if slot == Slot::Status {
        if directive.is_immutable {
            errors.push(ResolveError::conflict(field, "is_immutable on a status field"));
        }
        if directive.is_secret {
            errors.push(ResolveError::conflict(field, "is_secret on a status field"));
        }
    }
    errors
}

/// Name patterns for singleton flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePattern {
    /// `Name`, `{Resource}`, `{Resource}Name`, `{Resource}Id`
    PrimaryKey,
    /// `Arn`, `{Resource}Arn`
    Arn,
}

impl NamePattern {
    /// Whether `field` matches for `resource`, ignoring case
    #[must_use]
    pub fn matches(self, resource: &str, field: &str) -> bool {
        let field = field.to_ascii_lowercase();
        let resource = resource.to_ascii_lowercase();
        match self {
            Self::PrimaryKey => {
                field == "name"
                    || field == resource
                    || field == format!("{resource}name")
                    || field == format!("{resource}id")
            }
            Self::Arn => field == "arn" || field == format!("{resource}arn"),
        }
    }

    const fn attribute(self) -> Attribute {
        match self {
            Self::PrimaryKey => Attribute::PrimaryKey,
            Self::Arn => Attribute::Arn,
        }
    }
}

/// A field considered for a singleton flag
#[derive(Debug, Clone, Copy)]
pub struct SingletonCandidate<'a> {
    /// Field name
    pub field: &'a str,
    /// Explicit override value, if any
    pub explicit: Option<bool>,
    /// Whether the field may carry heuristic flags at all
    pub eligible: bool,
}

/// Outcome of a singleton assignment
#[derive(Debug, Clone, Default)]
pub struct SingletonOutcome {
    /// Decision per field, in candidate order
    pub flags: IndexMap<String, Decision<bool>>,
    /// Overridden and shadowed heuristics
    pub diagnostics: Diagnostics,
    /// Conflicting explicit assignments
    pub errors: Vec<ResolveError>,
}

impl SingletonOutcome {
    /// Field holding the flag
    #[must_use]
    pub fn holder(&self) -> Option<&str> {
        self.flags
            .iter()
            .find(|(_, d)| d.get())
            .map(|(name, _)| name.as_str())
    }
}

/// Assign a singleton flag across all fields of a resource.
///
/// Heuristic: the first eligible candidate matching `pattern` that is not
/// explicitly `false` wins; later matches are shadowed. An explicit `true`
/// anywhere disables the heuristic and holds the flag; a second explicit
/// `true` is a conflict.
#[must_use]
pub fn assign_singleton(resource: &str, pattern: NamePattern, candidates: &[SingletonCandidate<'_>]) -> SingletonOutcome {
    let attribute = pattern.attribute();
    let mut outcome = SingletonOutcome::default();

    let mut explicit_holder: Option<&str> = None;
    for c in candidates.iter().filter(|c| c.explicit == Some(true)) {
        match explicit_holder {
            None => explicit_holder = Some(c.field),
            Some(first) => outcome.errors.push(ResolveError::conflict(
                c.field,
                format!("{attribute} is also explicitly set on {first}"),
            )),
        }
    }

    let mut heuristic_holder: Option<&str> = None;
    for c in candidates {
        if !c.eligible || c.explicit == Some(false) || !pattern.matches(resource, c.field) {
            continue;
        }
        match heuristic_holder {
            None => heuristic_holder = Some(c.field),
            Some(winner) if explicit_holder.is_none() => {
                outcome.diagnostics.push(Diagnostic::shadowed(c.field, attribute, winner));
            }
            Some(_) => {}
        }
    }

    for c in candidates {
        let heuristic = heuristic_holder == Some(c.field);
        let decision = match (c.explicit, explicit_holder) {
            (Some(value), _) => Decision::Explicit(value),
            (None, Some(_)) if heuristic => Decision::Explicit(false),
            (None, Some(_)) => Decision::Heuristic(false),
            (None, None) => Decision::Heuristic(heuristic),
        };
        if decision.get() != heuristic {
            outcome
                .diagnostics
                .push(Diagnostic::overridden(c.field, attribute, heuristic, decision.get()));
        }
        outcome.flags.insert(c.field.to_string(), decision);
    }

    outcome
}
