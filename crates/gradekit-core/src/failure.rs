//! # Failures
//!
//! [`Failure`] is the one concrete type used to report every failure. It
//! carries three independent facts:
//!
//! - a [`Grade`] (how bad it is),
//! - an optional [`Tag`] (which caller-defined category it belongs to),
//! - a [`Kind`] (which family it is, with that family's data pack).
//!
//! Handlers test the axes separately, either directly (`is_at_least`,
//! `is_tagged`, `is_kind`) or through a [`Matcher`] describing a catch
//! clause:
//!
//! ```
//! use gradekit_core::{Failure, Grade, Matcher};
//!
//! struct Parsing;
//!
//! let failure = Failure::error("bad header").with_tag::<Parsing>();
//! let clause = Matcher::any().at_least(Grade::Error).tagged::<Parsing>();
//! assert!(clause.matches(&failure));
//! ```

use crate::grade::Grade;
use crate::kind::{IndexRange, Kind, KindId};
use crate::tag::Tag;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Boxed source error carried by a failure.
pub type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

// =============================================================================
// BUILD ERRORS
// =============================================================================

/// Errors raised while assembling a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The kind may not be raised at the requested grade.
    #[error("{kind} failures cannot be raised at grade {grade}")]
    GradeNotPermitted { kind: KindId, grade: Grade },
}

// =============================================================================
// FAILURE
// =============================================================================

/// A reported failure.
///
/// The kind always permits the grade; every constructor checks this.
#[derive(Debug)]
#[must_use]
pub struct Failure {
    grade: Grade,
    kind: Kind,
    tag: Option<Tag>,
    message: String,
    source: Option<BoxedSource>,
}

impl Failure {
    /// Generic failure at `grade`.
    pub fn new(grade: Grade, message: impl Into<String>) -> Self {
        Self {
            grade,
            kind: Kind::Generic,
            tag: None,
            message: message.into(),
            source: None,
        }
    }

    /// Start building a failure with a specific kind, tag or source.
    pub fn builder(grade: Grade, message: impl Into<String>) -> FailureBuilder {
        FailureBuilder {
            grade,
            message: message.into(),
            kind: Kind::Generic,
            tag: None,
            source: None,
        }
    }

    /// Generic Condition.
    pub fn condition(message: impl Into<String>) -> Self {
        Self::new(Grade::Condition, message)
    }

    /// Generic Notification.
    pub fn notification(message: impl Into<String>) -> Self {
        Self::new(Grade::Notification, message)
    }

    /// Generic Error.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Grade::Error, message)
    }

    /// Generic CriticalError.
    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(Grade::CriticalError, message)
    }

    /// Generic Violation.
    pub fn violation(message: impl Into<String>) -> Self {
        Self::new(Grade::Violation, message)
    }

    /// A producer ran out of work. Always a Condition.
    pub fn finished(message: impl Into<String>) -> Self {
        Self {
            kind: Kind::Finished,
            ..Self::condition(message)
        }
    }

    /// Failure to use the resource called `name`.
    pub fn named_resource(
        grade: Grade,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, BuildError> {
        Self::builder(grade, message)
            .kind(Kind::named_resource(name))
            .build()
    }

    /// A value outside its permitted range.
    pub fn out_of_range(grade: Grade, message: impl Into<String>) -> Result<Self, BuildError> {
        Self::builder(grade, message).kind(Kind::OutOfRange).build()
    }

    /// An index outside the bounds of a sequence.
    pub fn index_out_of_range(
        grade: Grade,
        range: IndexRange,
        message: impl Into<String>,
    ) -> Result<Self, BuildError> {
        Self::builder(grade, message)
            .kind(Kind::IndexOutOfRange(range))
            .build()
    }

    /// An allocation of `amount` bytes could not be satisfied.
    pub fn allocation(
        grade: Grade,
        amount: usize,
        message: impl Into<String>,
    ) -> Result<Self, BuildError> {
        Self::builder(grade, message)
            .kind(Kind::Allocation { amount })
            .build()
    }

    /// Lift a caller error that knows its own grade and tag.
    pub fn from_graded<E>(err: E) -> Self
    where
        E: Graded + StdError + Send + Sync + 'static,
    {
        let failure = Self::new(err.grade(), err.to_string());
        let failure = match err.tag() {
            Some(tag) => failure.with_tag_value(tag),
            None => failure,
        };
        failure.with_source(err)
    }

    /// Replace the tag with the one for marker type `T`.
    pub fn with_tag<T: ?Sized + 'static>(self) -> Self {
        self.with_tag_value(Tag::of::<T>())
    }

    /// Replace the tag.
    pub fn with_tag_value(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Attach the error that caused this failure.
    pub fn with_source<E: StdError + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // -------------------------------------------------------------------------
    // Grade axis
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn grade(&self) -> Grade {
        self.grade
    }

    #[must_use]
    pub fn is_grade(&self, grade: Grade) -> bool {
        self.grade == grade
    }

    /// Check if the failure is at least as severe as `min`.
    #[must_use]
    pub fn is_at_least(&self, min: Grade) -> bool {
        self.grade.is_at_least(min)
    }

    // -------------------------------------------------------------------------
    // Tag axis
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn tag(&self) -> Option<Tag> {
        self.tag
    }

    /// Check if the failure is tagged with marker type `T`.
    #[must_use]
    pub fn is_tagged<T: ?Sized + 'static>(&self) -> bool {
        self.tag.is_some_and(|tag| tag.is::<T>())
    }

    /// Check if the failure carries any tag at all.
    #[must_use]
    pub fn is_any_tagged(&self) -> bool {
        self.tag.is_some()
    }

    // -------------------------------------------------------------------------
    // Kind axis
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    #[must_use]
    pub fn kind_id(&self) -> KindId {
        self.kind.id()
    }

    /// Check if the failure's kind is `kind` or refines it.
    #[must_use]
    pub fn is_kind(&self, kind: KindId) -> bool {
        self.kind.id().is_a(kind)
    }

    #[must_use]
    pub fn resource_name(&self) -> Option<&str> {
        match &self.kind {
            Kind::NamedResource { name } => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub fn index_range(&self) -> Option<&IndexRange> {
        match &self.kind {
            Kind::IndexOutOfRange(range) => Some(range),
            _ => None,
        }
    }

    #[must_use]
    pub fn allocation_amount(&self) -> Option<usize> {
        match self.kind {
            Kind::Allocation { amount } => Some(amount),
            _ => None,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    // -------------------------------------------------------------------------
    // Handling
    // -------------------------------------------------------------------------

    /// Route a result through a catch clause.
    ///
    /// - `Ok(Ok(value))`: the operation succeeded.
    /// - `Ok(Err(failure))`: the clause caught the failure; handle it.
    /// - `Err(failure)`: not caught; propagate with `?`.
    pub fn catch<T>(
        result: Result<T, Failure>,
        matcher: &Matcher,
    ) -> Result<Result<T, Failure>, Failure> {
        match result {
            Ok(value) => Ok(Ok(value)),
            Err(failure) if matcher.matches(&failure) => Ok(Err(failure)),
            Err(failure) => Err(failure),
        }
    }

    /// Swallow the failure, if its grade allows a local handler to.
    ///
    /// CriticalError and Violation are handed back so they keep
    /// propagating. A Violation is never silently discarded.
    pub fn dismiss(self) -> Result<(), Failure> {
        match self.grade {
            grade if grade.is_locally_recoverable() => {
                tracing::debug!(grade = %grade, message = %self.message, "failure dismissed");
                Ok(())
            }
            Grade::CriticalError => {
                tracing::warn!(message = %self.message, "critical error cannot be dismissed locally");
                Err(self)
            }
            _ => {
                tracing::error!(message = %self.message, "violation cannot be dismissed");
                Err(self)
            }
        }
    }

    /// Serializable snapshot of the failure and its source chain.
    #[must_use]
    pub fn report(&self) -> FailureReport {
        let mut causes = Vec::new();
        let mut current = StdError::source(self);
        while let Some(err) = current {
            causes.push(err.to_string());
            current = err.source();
        }

        FailureReport {
            grade: self.grade,
            kind: self.kind.clone(),
            tag: self.tag.map(|tag| tag.name().to_string()),
            message: self.message.clone(),
            causes,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Failure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn StdError + 'static))
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Assembles a [`Failure`] with a kind, tag or source.
#[derive(Debug)]
#[must_use]
pub struct FailureBuilder {
    grade: Grade,
    message: String,
    kind: Kind,
    tag: Option<Tag>,
    source: Option<BoxedSource>,
}

impl FailureBuilder {
    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    /// Tag with marker type `T`.
    pub fn tag<T: ?Sized + 'static>(self) -> Self {
        self.tag_value(Tag::of::<T>())
    }

    pub fn tag_value(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn source<E: StdError + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Finish the failure, checking that the kind permits the grade.
    pub fn build(self) -> Result<Failure, BuildError> {
        let kind = self.kind.id();
        if !kind.permits(self.grade) {
            return Err(BuildError::GradeNotPermitted {
                kind,
                grade: self.grade,
            });
        }

        Ok(Failure {
            grade: self.grade,
            kind: self.kind,
            tag: self.tag,
            message: self.message,
            source: self.source,
        })
    }
}

// =============================================================================
// MATCHER
// =============================================================================

/// A catch clause: the set of failures a handler wants.
///
/// Every criterion left unset matches anything, so [`Matcher::any`]
/// catches every failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub struct Matcher {
    grade: Option<Grade>,
    min_grade: Option<Grade>,
    kind: Option<KindId>,
    tag: Option<Tag>,
    any_tagged: bool,
}

impl Matcher {
    /// Matches every failure.
    pub const fn any() -> Self {
        Self {
            grade: None,
            min_grade: None,
            kind: None,
            tag: None,
            any_tagged: false,
        }
    }

    /// Require exactly `grade`.
    pub const fn grade(mut self, grade: Grade) -> Self {
        self.grade = Some(grade);
        self
    }

    /// Require `min` or anything more severe.
    pub const fn at_least(mut self, min: Grade) -> Self {
        self.min_grade = Some(min);
        self
    }

    /// Require `kind` or a refinement of it.
    pub const fn kind(mut self, kind: KindId) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Require the tag for marker type `T`.
    pub fn tagged<T: ?Sized + 'static>(self) -> Self {
        self.tag(Tag::of::<T>())
    }

    pub const fn tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Require some tag, whichever it is.
    pub const fn any_tagged(mut self) -> Self {
        self.any_tagged = true;
        self
    }

    #[must_use]
    pub fn matches(&self, failure: &Failure) -> bool {
        self.grade.is_none_or(|grade| failure.is_grade(grade))
            && self.min_grade.is_none_or(|min| failure.is_at_least(min))
            && self.kind.is_none_or(|kind| failure.is_kind(kind))
            && self.tag.is_none_or(|tag| failure.tag() == Some(tag))
            && (!self.any_tagged || failure.is_any_tagged())
    }
}

// =============================================================================
// REPORT
// =============================================================================

/// Owned, serializable view of a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReport {
    pub grade: Grade,
    #[serde(flatten)]
    pub kind: Kind,
    pub tag: Option<String>,
    pub message: String,
    /// Source chain, outermost first.
    pub causes: Vec<String>,
}

// =============================================================================
// GRADED ERRORS
// =============================================================================

/// Errors that know their own grade.
///
/// Implement this on caller error enums to take part in grade-based
/// handling without converting to [`Failure`] first.
pub trait Graded {
    fn grade(&self) -> Grade;

    fn tag(&self) -> Option<Tag> {
        None
    }

    fn is_at_least(&self, min: Grade) -> bool {
        self.grade().is_at_least(min)
    }
}

impl Graded for Failure {
    fn grade(&self) -> Grade {
        self.grade
    }

    fn tag(&self) -> Option<Tag> {
        self.tag
    }
}

/// Lift plain errors into graded failures.
pub trait ResultExt<T> {
    /// Wrap the error as a generic failure at `grade`, keeping it as source.
    fn or_failure(self, grade: Grade, message: impl Into<String>) -> Result<T, Failure>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn or_failure(self, grade: Grade, message: impl Into<String>) -> Result<T, Failure> {
        self.map_err(|err| Failure::new(grade, message).with_source(err))
    }
}

// =============================================================================
// TESTS
// =============================================================================
