//! `A/B` date fragments, e.g. `3 JAN/5 FEB` or `3/5 JAN`.

use chrono::NaiveDate;

use crate::error::ParseError;
use crate::month::month_number;

/// One side of the `/`: a day, with or without its own month.
struct Side<'a> {
    day: u32,
    month: Option<&'a str>,
}

fn parse_side<'a>(fragment: &str, side: &'a str) -> Result<Side<'a>, ParseError> {
    let mut tokens = side.split_whitespace();
    let day_token = tokens
        .next()
        .ok_or_else(|| ParseError::date(fragment, "empty side"))?;
    let month = tokens.next();
    if tokens.next().is_some() {
        return Err(ParseError::date(
            fragment,
            format!("unexpected text in '{}'", side.trim()),
        ));
    }
    let day = day_token
        .parse::<u32>()
        .map_err(|_| ParseError::date(fragment, format!("day '{}' is not a number", day_token)))?;
    Ok(Side { day, month })
}

fn ymd(fragment: &str, year: i32, month: u32, day: u32) -> Result<String, ParseError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or_else(|| {
            ParseError::date(
                fragment,
                format!("{:04}-{:02}-{:02} is not a calendar date", year, month, day),
            )
        })
}

/// Resolve a date fragment against `year` into `(start, end)` as `YYYY-MM-DD`.
///
/// Both sides may carry their own month (`3 JAN/5 FEB`), or only the second
/// side does (`3/5 JAN`) and the first day borrows it. `year` is applied to
/// both sides as-is: `28 DEC/2 JAN` yields an end date before the start date.
pub fn parse_date_range(fragment: &str, year: i32) -> Result<(String, String), ParseError> {
    let parts: Vec<&str> = fragment.split('/').collect();
    if parts.len() != 2 {
        return Err(ParseError::date(
            fragment,
            format!("expected two '/'-separated parts, found {}", parts.len()),
        ));
    }

    let start = parse_side(fragment, parts[0])?;
    let end = parse_side(fragment, parts[1])?;

    let end_month = match end.month {
        Some(m) => month_number(m)?,
        None => return Err(ParseError::date(fragment, "second part has no month")),
    };
    let start_month = match start.month {
        Some(m) => month_number(m)?,
        None => end_month,
    };

    Ok((
        ymd(fragment, year, start_month, start.day)?,
        ymd(fragment, year, end_month, end.day)?,
    ))
}
