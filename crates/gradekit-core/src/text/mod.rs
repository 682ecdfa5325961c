//! # Text Module
//!
//! Small string algorithms:
//!
//! - `%name%` variable expansion, one-shot ([`expand_variables`]) or as a
//!   stack of layers in front of a writer ([`SubstitutionWriter`])
//! - comma lists with backslash escapes ([`parse_commas`])
//! - plain splitting ([`split`])
//! - integral ranges such as `3-7` ([`parse_range`], [`parse_ranges`])

mod parse;
mod variables;
mod writer;

pub use parse::*;
pub use variables::*;
pub use writer::*;

use thiserror::Error;

/// Errors from the string algorithms.
#[derive(Debug, Error)]
pub enum TextError {
    /// Nothing to parse.
    #[error("expected an integer or a range")]
    ExpectedIntegerOrRange,

    /// A range bound is not an integer of the requested type.
    #[error("invalid integer: {0:?}")]
    InvalidInteger(String),

    /// The upper bound is below the lower bound.
    #[error("inverted range: {low} is greater than {high}")]
    InvertedRange { low: String, high: String },

    /// The range expands to more than `MAX_RANGE_LENGTH` values.
    #[error("range too large: {0:?}")]
    RangeTooLarge(String),

    /// A backslash at the very end of a comma list.
    #[error("dangling escape at end of input")]
    DanglingEscape,

    /// `pop` with no substitution layer active.
    #[error("no substitution layer to end")]
    NoSubstitutionLayer,

    /// The underlying writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
