//! # gradekit-core
//!
//! Failure grading and small string algorithms - THE LOGIC.
//!
//! ## Failure Grading
//!
//! A reported failure is classified along two independent axes:
//!
//! - **grade**: a fixed severity order
//!   (`Condition < Notification < Error < CriticalError < Violation`)
//! - **tag**: an open-ended, caller-defined category (a marker type)
//!
//! plus a **kind** naming the failure family and carrying its data pack.
//! A single [`Failure`] type represents every combination, so a handler can
//! ask "is this at least an Error?" and "is this tagged `Disk`?" separately.
//!
//! ## String Algorithms
//!
//! The [`text`] module expands `%name%` variables (once, or through a stack
//! of layers in front of a writer), parses escaped comma lists, and expands
//! integral ranges such as `3-7`.
//!
//! ## Architectural Constraints
//!
//! - No async, no network, no global state
//! - No I/O except through writers supplied by the caller
//! - Never panics; fallible operations return `Result`

// =============================================================================
// MODULES
// =============================================================================

pub mod failure;
pub mod grade;
pub mod kind;
pub mod limits;
pub mod tag;
pub mod text;

// =============================================================================
// RE-EXPORTS: Failure Grading
// =============================================================================

pub use failure::{
    BoxedSource, BuildError, Failure, FailureBuilder, FailureReport, Graded, Matcher, ResultExt,
};
pub use grade::{Grade, GradeParseError, Recovery};
pub use kind::{IndexRange, Kind, KindId, KindParseError};
pub use tag::Tag;

// =============================================================================
// RE-EXPORTS: Text
// =============================================================================

pub use text::{
    RangeInt, SubstitutionWriter, TextError, VariableMap, expand_variables, parse_commas,
    parse_range, parse_ranges, split,
};
