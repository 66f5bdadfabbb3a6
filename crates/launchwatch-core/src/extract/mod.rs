//! Day/time window extraction from advisory detail text.
//!
//! Detail text carries entries such as
//!
//! ```text
//! Static Fire Launch Day (2) 3 JUN/4 JUN 1200Z-1800Z
//! Backup Day 5/6 JUN 0930Z-1130Z
//! ```
//!
//! A label is one or two words (letters, digits, `-`), optionally followed
//! by `Launch Day` and a parenthesised counter. Case is not significant.
//!
//! Extraction runs in two steps: a regex yields raw `(label, date, time)`
//! matches lazily, then each match is converted by [`parse_date_range`] and
//! [`parse_time_range`]. A match that fails conversion is logged and dropped;
//! the rest of the text is still scanned.
//!
//! The raw pattern is looser than the converters on purpose (bare days on
//! both sides of the `/`, three-digit times), so near-miss entries show up
//! in the logs instead of vanishing.

pub mod date_range;
pub mod time_range;

use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::warn;

use crate::error::ParseError;
use crate::models::ParsedWindow;

pub use date_range::parse_date_range;
pub use time_range::parse_time_range;

const WINDOW_PATTERN: &str = concat!(
    r"\b(?P<label>(?:\w[\w-]* )?\w[\w-]*(?i: Launch Day)?(?: \(\d+\))?)",
    r"\s+(?P<date>\d{1,2}(?: [A-Za-z]{3})?\s*/\s*\d{1,2}(?: [A-Za-z]{3})?)",
    r"\s+(?P<time>\b\d{3,4}Z?\s*-\s*\d{3,4}Z?\b)",
);

fn window_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(WINDOW_PATTERN).expect("window pattern is valid"))
}

fn convert(caps: &Captures<'_>, year: i32) -> Result<ParsedWindow, ParseError> {
    let dates = parse_date_range(&caps["date"], year)?;
    let times = parse_time_range(&caps["time"])?;
    Ok(ParsedWindow::new(caps["label"].trim(), dates, times))
}

/// Extract every well-formed window from `details`, in order of appearance.
///
/// `year` is applied to all dates. Malformed entries are skipped with a
/// warning; this function never fails.
pub fn extract_windows(details: &str, year: i32) -> Vec<ParsedWindow> {
    window_regex()
        .captures_iter(details)
        .filter_map(|caps| match convert(&caps, year) {
            Ok(window) => Some(window),
            Err(err) => {
                warn!(
                    label = &caps["label"],
                    fragment = &caps[0],
                    error = %err,
                    "skipping unparseable window"
                );
                None
            }
        })
        .collect()
}
