//! # Limits
//!
//! Compile-time constants shared by the string algorithms.

/// Maximum number of values a single range may expand to.
///
/// Ranges longer than this are rejected by `parse_range`.
/// This prevents memory exhaustion from input like `"0-18446744073709551615"`.
pub const MAX_RANGE_LENGTH: usize = 1_000_000;

/// Sigil used when none is given: `%name%`.
pub const DEFAULT_SIGIL: char = '%';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sigil_is_percent() {
        assert_eq!(DEFAULT_SIGIL, '%');
    }
}
