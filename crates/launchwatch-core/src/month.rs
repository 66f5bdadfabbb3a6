//! Three-letter month abbreviations used by advisory detail text.

use crate::error::ParseError;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Map a three-letter English month abbreviation (any case) to 1–12.
///
/// ```
/// use launchwatch_core::month::month_number;
///
/// assert_eq!(month_number("jun").unwrap(), 6);
/// assert!(month_number("JUNE").is_err());
/// ```
pub fn month_number(abbr: &str) -> Result<u32, ParseError> {
    let wanted = abbr.trim();
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(wanted))
        .map(|idx| idx as u32 + 1)
        .ok_or_else(|| ParseError::UnknownMonth(abbr.to_string()))
}
