//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! Every command writes its result to the supplied writer; logs go to
//! stderr through `tracing`.

use super::IntType;
use crate::CliError;
use crate::config::build_variables;
use gradekit_core::{
    Grade, KindId, RangeInt, Recovery, SubstitutionWriter, parse_commas, parse_ranges,
};
use serde::Serialize;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Write `value` as pretty JSON followed by a newline.
fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

// =============================================================================
// EXPAND COMMAND
// =============================================================================

/// Where `expand` reads its text from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandSource {
    /// Literal text from the command line.
    Text(String),
    /// Contents of a file.
    File(PathBuf),
    /// Standard input.
    Stdin,
}

/// Expand variables and stream the result to `out`.
///
/// `stdin` is read for [`ExpandSource::Stdin`].
pub fn cmd_expand(
    out: &mut dyn Write,
    stdin: &mut dyn Read,
    source: ExpandSource,
    sigil: char,
    vars_file: Option<&Path>,
    assignments: &[String],
) -> Result<(), CliError> {
    let vars = build_variables(vars_file, assignments)?;
    tracing::info!(variables = vars.len(), %sigil, "expanding");

    let mut writer = SubstitutionWriter::new(out);
    writer.push(sigil, vars);

    match source {
        ExpandSource::Text(text) => {
            writer.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                writer.write_all(b"\n")?;
            }
        }
        ExpandSource::File(path) => {
            let mut file =
                File::open(&path).map_err(|source| CliError::InputFile { path, source })?;
            io::copy(&mut file, &mut writer)?;
        }
        ExpandSource::Stdin => {
            io::copy(stdin, &mut writer)?;
        }
    }

    writer.into_inner()?;
    Ok(())
}

// =============================================================================
// COMMAS COMMAND
// =============================================================================

/// Parse an escaped comma list, one item per line.
pub fn cmd_commas(out: &mut dyn Write, json: bool, text: &str) -> Result<(), CliError> {
    let items = parse_commas(text)?;
    tracing::debug!(count = items.len(), "comma list parsed");

    if json {
        return write_json(out, &items);
    }
    for item in &items {
        writeln!(out, "{}", item)?;
    }
    Ok(())
}

// =============================================================================
// RANGE COMMAND
// =============================================================================

fn emit_values<T>(out: &mut dyn Write, json: bool, spec: &str) -> Result<(), CliError>
where
    T: RangeInt + Serialize,
{
    let values = parse_ranges::<T>(spec)?;
    tracing::debug!(count = values.len(), "range expanded");

    if json {
        return write_json(out, &values);
    }
    for value in &values {
        writeln!(out, "{}", value)?;
    }
    Ok(())
}

/// Expand a comma list of ranges.
pub fn cmd_range(
    out: &mut dyn Write,
    json: bool,
    spec: &str,
    int_type: IntType,
) -> Result<(), CliError> {
    match int_type {
        IntType::I64 => emit_values::<i64>(out, json, spec),
        IntType::U64 => emit_values::<u64>(out, json, spec),
    }
}

// =============================================================================
// GRADES COMMAND
// =============================================================================

/// One row of the grade table.
#[derive(Debug, Clone, Serialize)]
pub struct GradeRow {
    pub grade: Grade,
    pub rank: u8,
    pub recovery: Recovery,
    pub locally_recoverable: bool,
}

impl From<Grade> for GradeRow {
    fn from(grade: Grade) -> Self {
        Self {
            grade,
            rank: grade.rank(),
            recovery: grade.recovery(),
            locally_recoverable: grade.is_locally_recoverable(),
        }
    }
}

/// Show every grade with its handling contract.
pub fn cmd_grades(out: &mut dyn Write, json: bool) -> Result<(), CliError> {
    let rows: Vec<GradeRow> = Grade::ALL.into_iter().map(GradeRow::from).collect();

    if json {
        return write_json(out, &rows);
    }

    writeln!(out, "{:<16} {:>4}  {:<10} {}", "GRADE", "RANK", "RECOVERY", "LOCAL")?;
    for row in &rows {
        writeln!(
            out,
            "{:<16} {:>4}  {:<10} {}",
            row.grade.to_string(),
            row.rank,
            row.recovery.to_string(),
            yes_no(row.locally_recoverable)
        )?;
    }
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

// =============================================================================
// KINDS COMMAND
// =============================================================================

/// One row of the kind table.
#[derive(Debug, Clone, Serialize)]
pub struct KindRow {
    pub kind: KindId,
    pub parent: Option<KindId>,
    pub grades: Vec<Grade>,
}

impl From<KindId> for KindRow {
    fn from(kind: KindId) -> Self {
        Self {
            kind,
            parent: kind.parent(),
            grades: kind.permitted_grades(),
        }
    }
}

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Show every kind with its parent and permitted grades.
pub fn cmd_kinds(out: &mut dyn Write, json: bool) -> Result<(), CliError> {
    let rows: Vec<KindRow> = KindId::ALL.into_iter().map(KindRow::from).collect();

    if json {
        return write_json(out, &rows);
    }

    writeln!(out, "{:<20} {:<14} {}", "KIND", "PARENT", "GRADES")?;
    for row in &rows {
        let parent = row.parent.map_or_else(|| "-".to_string(), |p| p.to_string());
        writeln!(
            out,
            "{:<20} {:<14} {}",
            row.kind.to_string(),
            parent,
            join(&row.grades)
        )?;
    }
    Ok(())
}
