//! CLI error type.

use gradekit_core::{Grade, Graded, Tag, TextError};
use std::path::PathBuf;
use thiserror::Error;

/// Marker tag: the user asked for something malformed.
pub struct Usage;

/// Marker tag: reading input or writing output failed.
pub struct Stream;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Parsing or expansion failed.
    #[error(transparent)]
    Text(#[from] TextError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file given to `expand -f` could not be opened.
    #[error("cannot read input file {}: {source}", path.display())]
    InputFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The variables file could not be read.
    #[error("cannot read variables file {}: {source}", path.display())]
    VarsFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The variables file is not valid TOML.
    #[error("invalid variables file: {0}")]
    Toml(#[from] toml::de::Error),

    /// A variable was given an array or table value.
    #[error("variable {0:?} must be a string, number, boolean or date")]
    NonScalarVariable(String),

    /// A `--set` argument without `=`.
    #[error("invalid assignment {0:?}, expected NAME=VALUE")]
    InvalidAssignment(String),

    /// JSON output could not be produced.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl Graded for CliError {
    fn grade(&self) -> Grade {
        match self {
            CliError::Io(_) | CliError::Json(_) | CliError::Text(TextError::Io(_)) => {
                Grade::CriticalError
            }
            _ => Grade::Error,
        }
    }

    fn tag(&self) -> Option<Tag> {
        match self {
            CliError::Io(_)
            | CliError::InputFile { .. }
            | CliError::VarsFile { .. }
            | CliError::Json(_)
            | CliError::Text(TextError::Io(_)) => {
                Some(Tag::of::<Stream>())
            }
            _ => Some(Tag::of::<Usage>()),
        }
    }
}

/// Process exit status for a failure of `grade`.
///
/// `1` for ordinary errors, such as bad arguments or a missing file. `2`
/// once a stream broke mid-command and the output may be incomplete.
#[must_use]
pub fn exit_code(grade: Grade) -> i32 {
    if grade.is_at_least(Grade::CriticalError) {
        2
    } else {
        1
    }
}
