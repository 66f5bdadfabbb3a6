//! `HHMM-HHMM` time fragments, e.g. `1200Z-1800Z`.

use crate::error::ParseError;

fn hhmm(fragment: &str, side: &str) -> Result<String, ParseError> {
    let digits = side.trim().trim_end_matches(['Z', 'z']);
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::time(
            fragment,
            format!("'{}' is not four digits", side.trim()),
        ));
    }
    Ok(format!("{}:{}:00Z", &digits[..2], &digits[2..]))
}

/// Split a time fragment into `(start, end)` as `HH:MM:00Z`.
///
/// Trailing `Z` markers are accepted and dropped; the output `Z` is appended
/// literally. Hours and minutes are not range-checked, so `2400` comes back
/// as `24:00:00Z`.
pub fn parse_time_range(fragment: &str) -> Result<(String, String), ParseError> {
    let parts: Vec<&str> = fragment.split('-').collect();
    if parts.len() != 2 {
        return Err(ParseError::time(
            fragment,
            format!("expected two '-'-separated parts, found {}", parts.len()),
        ));
    }
    Ok((hhmm(fragment, parts[0])?, hhmm(fragment, parts[1])?))
}
