//! # Failure Grades
//!
//! Every reported failure has exactly one grade. The grade is the severity
//! axis; it says nothing about *why* the failure happened (that is the tag
//! and the kind), only about what a handler may do with it.
//!
//! ## Grade Table
//!
//! | Grade | Rank | Recovery | Meaning |
//! |-------|------|----------|---------|
//! | Condition | 0 | Resume | Out-of-band control-flow signal, not a fault |
//! | Notification | 1 | EndTask | Interrupt; ignoring it ends the current task |
//! | Error | 2 | Recover | Recoverable at any point |
//! | CriticalError | 3 | Unwind | Recoverable only by abandoning the procedure |
//! | Violation | 4 | Propagate | Unrecoverable; sanitize state and keep going out |
//!
//! There is no variant for the root grade. Every [`Failure`](crate::Failure)
//! is "a failure"; catching that is catching `Failure` itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// GRADE ENUM
// =============================================================================

/// Severity grade of a failure, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grade {
    /// Out-of-band message that changes the caller's control flow.
    Condition,
    /// Interrupt-like event; if ignored, the current task ends.
    Notification,
    /// Recoverable failure. The grade handlers normally catch.
    Error,
    /// Only recoverable by terminating the major procedure underway.
    CriticalError,
    /// Unrecoverable. Treat the handler as if it could not return.
    Violation,
}

impl Grade {
    /// All grades in ascending order of severity.
    pub const ALL: [Grade; 5] = [
        Grade::Condition,
        Grade::Notification,
        Grade::Error,
        Grade::CriticalError,
        Grade::Violation,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Grade::Condition => "condition",
            Grade::Notification => "notification",
            Grade::Error => "error",
            Grade::CriticalError => "critical-error",
            Grade::Violation => "violation",
        }
    }

    /// Position in the severity order, starting at 0.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        *self as u8
    }

    /// Check if this grade is at least as severe as `min`.
    #[must_use]
    pub fn is_at_least(&self, min: Grade) -> bool {
        *self >= min
    }

    /// Condition or Notification: signals rather than faults.
    #[must_use]
    pub const fn is_informational(&self) -> bool {
        matches!(self, Grade::Condition | Grade::Notification)
    }

    /// Error or anything more severe.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(
            self,
            Grade::Error | Grade::CriticalError | Grade::Violation
        )
    }

    /// What a handler is allowed to do with a failure of this grade.
    #[must_use]
    pub const fn recovery(&self) -> Recovery {
        match self {
            Grade::Condition => Recovery::Resume,
            Grade::Notification => Recovery::EndTask,
            Grade::Error => Recovery::Recover,
            Grade::CriticalError => Recovery::Unwind,
            Grade::Violation => Recovery::Propagate,
        }
    }

    /// Whether a handler close to the failure site may swallow it.
    #[must_use]
    pub const fn is_locally_recoverable(&self) -> bool {
        !matches!(self, Grade::CriticalError | Grade::Violation)
    }

    /// The next more severe grade, if any.
    #[must_use]
    pub const fn escalate(&self) -> Option<Grade> {
        match self {
            Grade::Condition => Some(Grade::Notification),
            Grade::Notification => Some(Grade::Error),
            Grade::Error => Some(Grade::CriticalError),
            Grade::CriticalError => Some(Grade::Violation),
            Grade::Violation => None,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A grade name that did not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown grade: {0:?}")]
pub struct GradeParseError(pub String);

impl FromStr for Grade {
    type Err = GradeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "condition" => Ok(Grade::Condition),
            "notification" => Ok(Grade::Notification),
            "error" => Ok(Grade::Error),
            "critical-error" | "criticalerror" | "critical" => Ok(Grade::CriticalError),
            "violation" => Ok(Grade::Violation),
            _ => Err(GradeParseError(s.to_string())),
        }
    }
}

// =============================================================================
// RECOVERY
// =============================================================================

/// The handling contract attached to each grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recovery {
    /// Handle and carry on; nothing went wrong.
    Resume,
    /// Wind down the current task, leave the program running.
    EndTask,
    /// Recover locally using the failure's data pack.
    Recover,
    /// Unwind to a top-level handler and rebuild state there.
    Unwind,
    /// Clean up persistent state only, then let it continue outward.
    Propagate,
}

impl Recovery {
    /// Stable lowercase name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Recovery::Resume => "resume",
            Recovery::EndTask => "end-task",
            Recovery::Recover => "recover",
            Recovery::Unwind => "unwind",
            Recovery::Propagate => "propagate",
        }
    }
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// TESTS
// =============================================================================
