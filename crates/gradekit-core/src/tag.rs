//! # Tags
//!
//! A tag is a caller-defined category label, independent of grade. Tags are
//! identified by a Rust type, usually a unit struct declared next to the
//! code that raises the failure:
//!
//! ```
//! use gradekit_core::Tag;
//!
//! struct ConfigMissing;
//!
//! let tag = Tag::of::<ConfigMissing>();
//! assert!(tag.is::<ConfigMissing>());
//! assert_eq!(tag.name(), "ConfigMissing");
//! ```
//!
//! Two tags are equal exactly when their marker types are the same type.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Category label identified by a marker type.
#[derive(Clone, Copy)]
pub struct Tag {
    id: TypeId,
    type_name: &'static str,
}

impl Tag {
    /// The tag for marker type `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// Check if this tag was made from marker type `T`.
    #[must_use]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Marker type name without its module path.
    #[must_use]
    pub fn name(&self) -> &'static str {
        short_name(self.type_name)
    }

    /// Fully qualified marker type name.
    #[must_use]
    pub fn full_name(&self) -> &'static str {
        self.type_name
    }
}

/// Strip the module path, keeping generic arguments intact.
///
/// Tuples, arrays, slices and references keep their full name.
fn short_name(full: &'static str) -> &'static str {
    if !full.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
        return full;
    }
    let head = full.find('<').map_or(full, |i| &full[..i]);
    match head.rfind("::") {
        Some(i) => &full[i + 2..],
        None => full,
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.type_name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alpha;
    struct Beta;
    struct Wrapper<T>(T);

    #[test]
    fn same_type_same_tag() {
        assert_eq!(Tag::of::<Alpha>(), Tag::of::<Alpha>());
        assert_ne!(Tag::of::<Alpha>(), Tag::of::<Beta>());
    }

    #[test]
    fn is_checks_marker() {
        let tag = Tag::of::<Alpha>();
        assert!(tag.is::<Alpha>());
        assert!(!tag.is::<Beta>());
    }

    #[test]
    fn short_name_strips_path() {
        assert_eq!(Tag::of::<Alpha>().name(), "Alpha");
        assert!(Tag::of::<Alpha>().full_name().ends_with("tests::Alpha"));
    }

    #[test]
    fn short_name_keeps_generics() {
        let name = Tag::of::<Wrapper<Alpha>>().name();
        assert!(name.starts_with("Wrapper<"));
        assert_ne!(Tag::of::<Wrapper<Alpha>>(), Tag::of::<Wrapper<Beta>>());
    }

    #[test]
    fn compound_markers_keep_full_name() {
        let pair = Tag::of::<(Alpha, Beta)>();
        assert_eq!(pair.name(), pair.full_name());
        assert!(pair.name().starts_with('('));
        assert!(pair.name().ends_with("Beta)"));

        let list = Tag::of::<[Alpha]>();
        assert_eq!(list.name(), list.full_name());
    }

    #[test]
    fn hash_follows_identity() {
        let mut set = std::collections::HashSet::new();
        set.insert(Tag::of::<Alpha>());
        set.insert(Tag::of::<Alpha>());
        set.insert(Tag::of::<Beta>());
        assert_eq!(set.len(), 2);
    }
}
