//! # Failure Kinds
//!
//! Kinds are the concrete failure families. Each carries its own data pack
//! and restricts which grades it may be raised at:
//!
//! | Kind | Parent | Data | Permitted grades |
//! |------|--------|------|------------------|
//! | generic | - | - | all |
//! | named-resource | - | resource name | notification .. violation |
//! | out-of-range | - | - | error .. violation |
//! | index-out-of-range | out-of-range | requested index, bounds | error .. violation |
//! | allocation | - | requested bytes | error .. violation |
//! | finished | - | - | condition |

use crate::grade::Grade;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// KIND IDENTIFIERS
// =============================================================================

/// Identifier of a failure family, without its data pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KindId {
    /// No particular family.
    Generic,
    /// A named resource (file, device, peer) could not be used.
    NamedResource,
    /// A value fell outside its permitted range.
    OutOfRange,
    /// An index fell outside the bounds of a sequence.
    IndexOutOfRange,
    /// An allocation request could not be satisfied.
    Allocation,
    /// A producer has no more work to hand out.
    Finished,
}

impl KindId {
    /// All kinds, parents before children.
    pub const ALL: [KindId; 6] = [
        KindId::Generic,
        KindId::NamedResource,
        KindId::OutOfRange,
        KindId::IndexOutOfRange,
        KindId::Allocation,
        KindId::Finished,
    ];

    /// Stable kebab-case name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            KindId::Generic => "generic",
            KindId::NamedResource => "named-resource",
            KindId::OutOfRange => "out-of-range",
            KindId::IndexOutOfRange => "index-out-of-range",
            KindId::Allocation => "allocation",
            KindId::Finished => "finished",
        }
    }

    /// The more general family this one refines.
    #[must_use]
    pub const fn parent(&self) -> Option<KindId> {
        match self {
            KindId::IndexOutOfRange => Some(KindId::OutOfRange),
            _ => None,
        }
    }

    /// Check if this kind is `other` or refines it.
    #[must_use]
    pub fn is_a(&self, other: KindId) -> bool {
        let mut current = Some(*self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// Check if failures of this kind may be raised at `grade`.
    #[must_use]
    pub const fn permits(&self, grade: Grade) -> bool {
        match self {
            KindId::Generic => true,
            KindId::NamedResource => !matches!(grade, Grade::Condition),
            KindId::OutOfRange | KindId::IndexOutOfRange | KindId::Allocation => matches!(
                grade,
                Grade::Error | Grade::CriticalError | Grade::Violation
            ),
            KindId::Finished => matches!(grade, Grade::Condition),
        }
    }

    /// The grades this kind permits, in ascending order.
    #[must_use]
    pub fn permitted_grades(&self) -> Vec<Grade> {
        Grade::ALL
            .into_iter()
            .filter(|grade| self.permits(*grade))
            .collect()
    }
}

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A kind name that did not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown kind: {0:?}")]
pub struct KindParseError(pub String);

impl FromStr for KindId {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        KindId::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| KindParseError(s.to_string()))
    }
}

// =============================================================================
// DATA PACKS
// =============================================================================

/// Index bounds attached to an index-out-of-range failure.
///
/// `lower` is inclusive, `upper` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexRange {
    /// The index that was asked for.
    pub requested: usize,
    /// Smallest valid index.
    pub lower: usize,
    /// One past the largest valid index.
    pub upper: usize,
}

impl IndexRange {
    /// Create index information for a failed lookup.
    #[must_use]
    pub const fn new(requested: usize, lower: usize, upper: usize) -> Self {
        Self {
            requested,
            lower,
            upper,
        }
    }

    /// Bounds for a slice of `len` elements.
    #[must_use]
    pub const fn for_len(requested: usize, len: usize) -> Self {
        Self::new(requested, 0, len)
    }

    /// Check if `index` lies within the bounds.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.lower && index < self.upper
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} not in [{}, {})", self.requested, self.lower, self.upper)
    }
}

/// A failure family together with its data pack.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Kind {
    #[default]
    Generic,
    /// The resource is identified by name.
    NamedResource { name: String },
    OutOfRange,
    IndexOutOfRange(IndexRange),
    /// Requested size in bytes.
    Allocation { amount: usize },
    Finished,
}

impl Kind {
    /// Identifier of this kind.
    #[must_use]
    pub const fn id(&self) -> KindId {
        match self {
            Kind::Generic => KindId::Generic,
            Kind::NamedResource { .. } => KindId::NamedResource,
            Kind::OutOfRange => KindId::OutOfRange,
            Kind::IndexOutOfRange(_) => KindId::IndexOutOfRange,
            Kind::Allocation { .. } => KindId::Allocation,
            Kind::Finished => KindId::Finished,
        }
    }

    /// Named-resource kind.
    #[must_use]
    pub fn named_resource(name: impl Into<String>) -> Self {
        Kind::NamedResource { name: name.into() }
    }
}
