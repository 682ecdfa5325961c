//! Comma lists, splitting and integral ranges.

use super::TextError;
use crate::limits::MAX_RANGE_LENGTH;
use std::fmt::Display;
use std::str::FromStr;

/// Parse a comma separated list with backslash escapes.
///
/// | Escape | Result |
/// |--------|--------|
/// | `\,` | `,` |
/// | `\\` | `\` |
/// | `\n` `\t` `\r` `\0` | newline, tab, carriage return, NUL |
/// | `\` + anything else | that character |
///
/// Empty input yields no items. Otherwise empty fields are kept, so
/// `"a,,b"` has three items.
pub fn parse_commas(text: &str) -> Result<Vec<String>, TextError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars.next().ok_or(TextError::DanglingEscape)?;
                current.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '0' => '\0',
                    other => other,
                });
            }
            ',' => items.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }

    items.push(current);
    Ok(items)
}

/// Split on every `token`, keeping empty fields.
#[must_use]
pub fn split(text: &str, token: char) -> Vec<String> {
    text.split(token).map(String::from).collect()
}

mod sealed {
    pub trait Sealed {}
}

/// Primitive integers accepted by [`parse_range`].
pub trait RangeInt: Copy + Ord + FromStr + Display + sealed::Sealed {
    #[doc(hidden)]
    fn successor(self) -> Option<Self>;
    /// Number of values in `low..=high`, if it fits in `usize`.
    #[doc(hidden)]
    fn span(low: Self, high: Self) -> Option<usize>;
}

macro_rules! impl_range_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl RangeInt for $t {
                fn successor(self) -> Option<Self> {
                    self.checked_add(1)
                }

                fn span(low: Self, high: Self) -> Option<usize> {
                    usize::try_from(high.abs_diff(low)).ok()?.checked_add(1)
                }
            }
        )*
    };
}

impl_range_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

fn parse_bound<T: RangeInt>(text: &str) -> Result<T, TextError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TextError::ExpectedIntegerOrRange);
    }
    text.parse::<T>()
        .map_err(|_| TextError::InvalidInteger(text.to_string()))
}

/// Parse `N` or `LOW-HIGH` into the inclusive list of values.
///
/// At most `MAX_RANGE_LENGTH` values are produced.
///
/// A leading `-` is a sign, not a separator: `"-4"` is one value and
/// `"-3--1"` is `[-3, -2, -1]`.
pub fn parse_range<T: RangeInt>(text: &str) -> Result<Vec<T>, TextError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TextError::ExpectedIntegerOrRange);
    }

    let separator = text
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '-')
        .map(|(i, _)| i);

    let Some(dash) = separator else {
        return Ok(vec![parse_bound(text)?]);
    };

    let low: T = parse_bound(&text[..dash])?;
    let high: T = parse_bound(&text[dash + 1..])?;
    if high < low {
        return Err(TextError::InvertedRange {
            low: low.to_string(),
            high: high.to_string(),
        });
    }

    let len = T::span(low, high)
        .filter(|&len| len <= MAX_RANGE_LENGTH)
        .ok_or_else(|| TextError::RangeTooLarge(text.to_string()))?;

    Ok(std::iter::successors(Some(low), |value| value.successor())
        .take(len)
        .collect())
}

/// Parse a comma list of ranges, concatenated in order: `"1,3-5"`.
///
/// The whole list may produce at most `MAX_RANGE_LENGTH` values; past that
/// it fails with [`TextError::RangeTooLarge`] even when every item is
/// within the limit on its own.
pub fn parse_ranges<T: RangeInt>(text: &str) -> Result<Vec<T>, TextError> {
    if text.trim().is_empty() {
        return Err(TextError::ExpectedIntegerOrRange);
    }

    let mut values = Vec::new();
    for item in parse_commas(text)? {
        values.extend(parse_range::<T>(&item)?);
        if values.len() > MAX_RANGE_LENGTH {
            return Err(TextError::RangeTooLarge(text.to_string()));
        }
    }
    Ok(values)
}
