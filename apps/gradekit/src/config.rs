//! Variables-file loading.
//!
//! A variables file is a flat TOML table:
//!
//! ```toml
//! user = "ada"
//! port = 8080
//! verbose = true
//! ```
//!
//! Scalars are rendered with their TOML text form; arrays and tables are
//! rejected. `--set NAME=VALUE` arguments are applied afterwards and win
//! over the file.

use crate::CliError;
use gradekit_core::VariableMap;
use std::path::Path;
use toml::{Table, Value};

/// Parse variables from TOML text.
pub fn parse_variables(text: &str) -> Result<VariableMap, CliError> {
    let table: Table = toml::from_str(text)?;
    let mut vars = VariableMap::new();

    for (name, value) in table {
        let rendered = match value {
            Value::String(s) => s,
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Datetime(d) => d.to_string(),
            Value::Array(_) | Value::Table(_) => return Err(CliError::NonScalarVariable(name)),
        };
        vars.insert(name, rendered);
    }

    Ok(vars)
}

/// Load variables from a TOML file.
pub fn load_variables(path: &Path) -> Result<VariableMap, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::VarsFile {
        path: path.to_path_buf(),
        source,
    })?;
    let vars = parse_variables(&text)?;
    tracing::debug!(path = %path.display(), count = vars.len(), "variables loaded");
    Ok(vars)
}

/// Split a `NAME=VALUE` assignment at the first `=`.
pub fn parse_assignment(arg: &str) -> Result<(String, String), CliError> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(CliError::InvalidAssignment(arg.to_string())),
    }
}

/// Build the variable map for `expand`: file first, then assignments.
pub fn build_variables(file: Option<&Path>, assignments: &[String]) -> Result<VariableMap, CliError> {
    let mut vars = match file {
        Some(path) => load_variables(path)?,
        None => VariableMap::new(),
    };

    for arg in assignments {
        let (name, value) = parse_assignment(arg)?;
        vars.insert(name, value);
    }

    Ok(vars)
}
