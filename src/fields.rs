//! Field parsing utilities for fixed-width sensor columns
//!
//! Numeric columns are blank padded, so every value is trimmed of
//! surrounding spaces before parsing. A column that still fails to parse
//! yields the type's zero value: the sensor writes blanks or garbage into
//! columns it has no reading for, and that must not fail the whole line.

use std::str::FromStr;
use tracing::{debug, trace};

/// Numeric types a column can be decoded into
pub trait Number: FromStr + Default + Copy {}

impl Number for i32 {}
impl Number for f64 {}

/// Strip leading and trailing ASCII spaces. Tabs and other whitespace are kept.
pub fn trim_spaces(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != b' ').unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|&b| b != b' ')
        .map_or(start, |last| last + 1);
    &bytes[start..end]
}

/// Parse a column, returning `None` when it is not a valid number
pub fn try_parse_number<T: Number>(bytes: &[u8]) -> Option<T> {
    let text = std::str::from_utf8(trim_spaces(bytes)).ok()?;
    text.parse::<T>().ok()
}

/// Parse a column, falling back to zero when it is blank or malformed.
/// Columns that had content but no number are logged at debug level.
pub fn parse_number<T: Number>(bytes: &[u8]) -> T {
    try_parse_number(bytes).unwrap_or_else(|| {
        if is_blank(bytes) {
            trace!("Blank column read as zero");
        } else {
            debug!(
                "Column holds {:?}, not a number; reading it as zero",
                String::from_utf8_lossy(bytes)
            );
        }
        T::default()
    })
}

/// Single character column
pub fn parse_char(bytes: &[u8]) -> char {
    bytes.first().map_or('\0', |&b| char::from(b))
}

/// True when the column holds nothing but spaces
pub fn is_blank(bytes: &[u8]) -> bool {
    trim_spaces(bytes).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_spaces() {
        assert_eq!(trim_spaces(b"  42 "), b"42");
        assert_eq!(trim_spaces(b"42"), b"42");
        assert_eq!(trim_spaces(b"     "), b"");
        assert_eq!(trim_spaces(b""), b"");
        // only spaces are stripped
        assert_eq!(trim_spaces(b"\t42 "), b"\t42");
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(parse_number::<i32>(b"00019"), 19);
        assert_eq!(parse_number::<i32>(b"42"), 42);
        assert_eq!(parse_number::<i32>(b" 7"), 7);
        assert_eq!(parse_number::<i32>(b"-3"), -3);
        assert_eq!(parse_number::<i32>(b"000"), 0);
    }

    #[test]
    fn test_parse_floats() {
        assert_eq!(parse_number::<f64>(b"79.6 "), 79.6);
        assert_eq!(parse_number::<f64>(b"93    "), 93.0);
        assert_eq!(parse_number::<f64>(b"-12.5"), -12.5);
        assert_eq!(parse_number::<f64>(b"045454.59025"), 45454.59025);
    }

    #[test]
    fn test_blank_and_malformed_columns_yield_zero() {
        assert_eq!(parse_number::<i32>(b"  "), 0);
        assert_eq!(parse_number::<f64>(b"     "), 0.0);
        assert_eq!(parse_number::<i32>(b"4x"), 0);
        assert_eq!(parse_number::<i32>(b"4.5"), 0);
        assert_eq!(parse_number::<f64>(b"--"), 0.0);
        assert_eq!(parse_number::<i32>(b"\t4"), 0);
        assert_eq!(parse_number::<f64>(&[0xff, 0xfe]), 0.0);
    }

    #[test]
    fn test_try_parse_distinguishes_failure() {
        assert_eq!(try_parse_number::<i32>(b"0"), Some(0));
        assert_eq!(try_parse_number::<i32>(b"  "), None);
        assert!(is_blank(b"   "));
        assert!(!is_blank(b" 1 "));
    }

    #[test]
    fn test_parse_char() {
        assert_eq!(parse_char(b"F"), 'F');
        assert_eq!(parse_char(b"m"), 'm');
        assert_eq!(parse_char(b""), '\0');
    }
}
