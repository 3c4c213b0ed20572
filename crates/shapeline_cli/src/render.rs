//! Text and JSON output.

use indexmap::IndexMap;
use serde::Serialize;
use shapeline_core::Diagnostics;
use shapeline_resolve::{Resolution, ResolveFailure, ResolvedField, TypeSource};
use shapeline_shape::ShapeGraph;
use std::io::{self, Write};

/// Outcome of one resource
pub type Outcome = Result<Resolution, ResolveFailure>;

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Report<'a> {
    Resolved {
        #[serde(flatten)]
        resolution: &'a Resolution,
    },
    Failed {
        resource: &'a str,
        diagnostics: &'a Diagnostics,
    },
}

impl<'a> From<&'a Outcome> for Report<'a> {
    fn from(outcome: &'a Outcome) -> Self {
        match outcome {
            Ok(resolution) => Self::Resolved { resolution },
            Err(failure) => Self::Failed {
                resource: &failure.resource,
                diagnostics: &failure.diagnostics,
            },
        }
    }
}

/// Write outcomes as a pretty JSON object keyed by resource
pub fn write_json(out: &mut impl Write, outcomes: &IndexMap<String, Outcome>) -> io::Result<()> {
    let reports: IndexMap<&str, Report<'_>> = outcomes
        .iter()
        .map(|(name, outcome)| (name.as_str(), Report::from(outcome)))
        .collect();
    serde_json::to_writer_pretty(&mut *out, &reports)?;
    writeln!(out)
}

/// Write outcomes as field tables
pub fn write_text(out: &mut impl Write, graph: &ShapeGraph, outcomes: &IndexMap<String, Outcome>) -> io::Result<()> {
    for (name, outcome) in outcomes {
        match outcome {
            Ok(resolution) => write_resolution(out, graph, resolution)?,
            Err(failure) => {
                writeln!(out, "{name}: failed")?;
                write_diagnostics(out, &failure.diagnostics)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write diagnostics only, one per line
pub fn write_diagnostics(out: &mut impl Write, diagnostics: &Diagnostics) -> io::Result<()> {
    for d in diagnostics {
        writeln!(out, "  {d}")?;
    }
    Ok(())
}

fn write_resolution(out: &mut impl Write, graph: &ShapeGraph, resolution: &Resolution) -> io::Result<()> {
    writeln!(out, "{}", resolution.resource)?;

    let rows: Vec<[String; 5]> = resolution
        .fields
        .values()
        .map(|f| {
            [
                f.name.clone(),
                f.slot().to_string(),
                graph.render(&f.ty),
                source_label(&f.source),
                flags(f).join(","),
            ]
        })
        .collect();
    let header = ["FIELD", "SLOT", "TYPE", "SOURCE", "FLAGS"].map(str::to_string);

    let mut widths = header.clone().map(|h| h.len());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }
    for row in std::iter::once(&header).chain(&rows) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        writeln!(out, "  {}", line.join("  ").trim_end())?;
    }

    writeln!(out, "  columns: {}", resolution.columns.headers().join(", "))?;
    if !resolution.diagnostics.is_empty() {
        writeln!(out, "  diagnostics:")?;
        for d in &resolution.diagnostics {
            writeln!(out, "    {d}")?;
        }
    }
    Ok(())
}

fn source_label(source: &TypeSource) -> String {
    match source {
        TypeSource::Lineage => "lineage".to_string(),
        TypeSource::Redirect { operation, path, .. } => format!("{operation}:{path}"),
        TypeSource::Attribute => "attribute".to_string(),
    }
}

fn flags(field: &ResolvedField) -> Vec<&'static str> {
    [
        (field.is_required.get(), "required"),
        (field.is_primary_key.get(), "primary_key"),
        (field.is_arn.get(), "arn"),
        (field.is_owner_account_id, "owner_account_id"),
        (field.is_secret, "secret"),
        (field.is_immutable, "immutable"),
        (field.is_attribute_unpacked, "attribute"),
        (field.compare.ignored, "compare_ignored"),
        (field.compare.nil_equals_zero, "nil_equals_zero"),
        (field.late_init.is_some(), "late_init"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect()
}
