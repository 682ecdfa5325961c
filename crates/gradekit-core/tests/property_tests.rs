//! # Property-Based Tests
//!
//! Invariants of grading and of the string algorithms, checked with proptest.

use gradekit_core::{
    Failure, Grade, KindId, Matcher, VariableMap, expand_variables, parse_commas, parse_range,
};
use proptest::collection::vec;
use proptest::prelude::*;

struct Marker;

fn any_grade() -> impl Strategy<Value = Grade> {
    prop::sample::select(Grade::ALL.to_vec())
}

fn any_kind() -> impl Strategy<Value = KindId> {
    prop::sample::select(KindId::ALL.to_vec())
}

/// Escape a field so `parse_commas` reads it back unchanged.
fn escape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            ',' => out.push_str("\\,"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// `is_at_least` agrees with the derived order for every pair.
    #[test]
    fn at_least_matches_order(grade in any_grade(), min in any_grade()) {
        let failure = Failure::new(grade, "x");
        prop_assert_eq!(failure.is_at_least(min), grade >= min);
        prop_assert_eq!(Matcher::any().at_least(min).matches(&failure), grade >= min);
    }

    /// Tagging never changes the grade.
    #[test]
    fn tagging_preserves_grade(grade in any_grade()) {
        let failure = Failure::new(grade, "x").with_tag::<Marker>();
        prop_assert!(failure.is_grade(grade));
        prop_assert!(failure.is_tagged::<Marker>());
    }

    /// `is_a` is reflexive and only ever climbs to a parent.
    #[test]
    fn kind_hierarchy_is_consistent(a in any_kind(), b in any_kind()) {
        prop_assert!(a.is_a(a));
        if a != b && a.is_a(b) {
            prop_assert_eq!(a.parent(), Some(b));
        }
    }

    /// Text without the sigil is returned untouched.
    #[test]
    fn expansion_without_sigil_is_identity(text in "[a-z ,.]{0,64}") {
        let vars: VariableMap = [("a", "1")].into_iter().collect();
        prop_assert_eq!(expand_variables(&text, &vars, '%'), text);
    }

    /// Escaped fields survive a join and parse.
    #[test]
    fn commas_read_back_escaped_fields(fields in vec("[a-z,\\\\ \t\n]{0,8}", 1..8)) {
        let joined = fields.iter().map(|f| escape_field(f)).collect::<Vec<_>>().join(",");
        let parsed = parse_commas(&joined).expect("parse");

        if joined.is_empty() {
            prop_assert!(parsed.is_empty());
        } else {
            prop_assert_eq!(parsed, fields);
        }
    }

    /// A valid range has `high - low + 1` consecutive values.
    #[test]
    fn range_length_and_order(low in -500i64..500, span in 0i64..500) {
        let high = low + span;
        let values = parse_range::<i64>(&format!("{low}-{high}")).expect("parse");

        prop_assert_eq!(values.len() as i64, span + 1);
        prop_assert_eq!(values.first().copied(), Some(low));
        prop_assert_eq!(values.last().copied(), Some(high));
        prop_assert!(values.windows(2).all(|w| w[1] == w[0] + 1));
    }
}
