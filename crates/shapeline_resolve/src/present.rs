//! Presentation policy: which fields become listing columns and in what
//! order.
//!
//! Only fields with an explicit `print` directive become columns. The
//! column plan always opens with the resource name column and, unless
//! disabled, closes with the age column.

use crate::field::ResolvedField;
use serde::{Deserialize, Serialize};
use shapeline_config::{FieldConfig, PrintOrderBy, ResourcePrintConfig};
use shapeline_core::{ResolveError, ResolveResult, Slot};

/// Listing view a column shows in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentTier {
    /// Priority 0
    Standard,
    /// Priority greater than 0
    Wide,
}

impl PresentTier {
    /// Tier of a column priority
    #[must_use]
    pub const fn from_priority(priority: u32) -> Self {
        if priority == 0 { Self::Standard } else { Self::Wide }
    }
}

/// Column attached to a field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresentPolicy {
    /// Column header
    pub header: String,
    /// Whether `header` came from `print.name`
    pub header_overridden: bool,
    /// Raw priority
    pub priority: u32,
    /// Tier derived from the priority
    pub tier: PresentTier,
    /// Position used when ordering by index
    pub index: i64,
}

/// Attach the presentation policy of a field.
///
/// # Errors
///
/// Returns `ConflictingOverride` if the field is ignored, either by slot or
/// by `compare.is_ignored`.
pub fn attach_present_policy(field: &str, slot: Slot, directive: Option<&FieldConfig>) -> ResolveResult<Option<PresentPolicy>> {
    let Some(directive) = directive else {
        return Ok(None);
    };
    let Some(print) = directive.print.as_ref() else {
        return Ok(None);
    };
    if slot == Slot::Ignored {
        return Err(ResolveError::conflict(field, "ignored field has a print policy"));
    }
    if directive.compare.is_some_and(|c| c.is_ignored) {
        return Err(ResolveError::conflict(field, "compare.is_ignored field has a print policy"));
    }

    let (header, header_overridden) = match print.name.as_deref() {
        Some(name) if !name.is_empty() => (name.to_string(), true),
        _ => (field.to_string(), false),
    };
    Ok(Some(PresentPolicy {
        header,
        header_overridden,
        priority: print.priority,
        tier: PresentTier::from_priority(print.priority),
        index: print.index,
    }))
}

/// What a column displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSource {
    /// Fixed leading resource name column
    Name,
    /// A resolved field
    Field {
        /// Field name
        field: String,
        /// Slot the value is read from
        slot: Slot,
    },
    /// Fixed trailing age column
    Age,
}

/// A single listing column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column header
    pub header: String,
    /// Priority (0 = standard view)
    pub priority: u32,
    /// What the column shows
    pub source: ColumnSource,
}

/// Ordered listing columns of a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPlan {
    /// Columns in display order
    pub columns: Vec<Column>,
}

impl ColumnPlan {
    /// Build the plan from resolved fields given in declaration order.
    ///
    /// With [`PrintOrderBy::Index`] field columns are stably sorted by
    /// index, so the smallest index sits right after the name column, the
    /// largest right before the age column, and ties keep declaration order.
    #[must_use]
    pub fn build<'f>(fields: impl IntoIterator<Item = &'f ResolvedField>, print: &ResourcePrintConfig) -> Self {
        let mut field_columns: Vec<(i64, Column)> = fields
            .into_iter()
            .filter_map(|f| {
                f.present.as_ref().map(|p| {
                    (
                        p.index,
                        Column {
                            header: p.header.clone(),
                            priority: p.priority,
                            source: ColumnSource::Field {
                                field: f.name.clone(),
                                slot: f.slot.get(),
                            },
                        },
                    )
                })
            })
            .collect();
        if print.order_by == PrintOrderBy::Index {
            field_columns.sort_by_key(|(index, _)| *index);
        }

        let mut columns = Vec::with_capacity(field_columns.len() + 2);
        columns.push(Column {
            header: "NAME".to_string(),
            priority: 0,
            source: ColumnSource::Name,
        });
        columns.extend(field_columns.into_iter().map(|(_, c)| c));
        if print.add_age_column {
            columns.push(Column {
                header: "AGE".to_string(),
                priority: 0,
                source: ColumnSource::Age,
            });
        }
        Self { columns }
    }

    /// Columns of one tier, in display order
    pub fn tier(&self, tier: PresentTier) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(move |c| PresentTier::from_priority(c.priority) == tier)
    }

    /// Headers in display order
    #[must_use]
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }
}
