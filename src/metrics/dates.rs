//! Date arithmetic for iterations and projections

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};

use crate::error::helpers::common;
use crate::error::{ErrorCode, MacroError, Result};

/// Working days, Monday first
pub const WEEKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d %b %Y", "%m/%d/%Y", "%b %d, %Y", "%Y/%m/%d"];

/// Parse a date the host may hand back in any of its display formats
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| common::invalid_date(text))
}

/// Inclusive length of an iteration in days
pub fn iteration_length_in_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Date the remaining work completes if it takes `remaining_iterations`
/// iterations of `iteration_length` days after `last_end`.
///
/// The projection lands on the last day of the final iteration, so the
/// offset is `iteration_length * remaining_iterations - 1` days.
pub fn expected_completion_date(
    last_end: NaiveDate,
    iteration_length: i64,
    remaining_iterations: i64,
) -> Result<NaiveDate> {
    let offset = iteration_length
        .checked_mul(remaining_iterations)
        .and_then(|days| days.checked_sub(1));
    add_days(last_end, offset)
}

/// `start + days`, failing instead of overflowing
pub fn add_days(start: NaiveDate, days: Option<i64>) -> Result<NaiveDate> {
    days.and_then(TimeDelta::try_days)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or_else(|| {
            MacroError::Calculation {
                code: ErrorCode::CALC_DATE_OUT_OF_RANGE,
                message: format!("projected date from {} is out of range", start),
                source: None,
            }
        })
}

/// Weekdays from `start` to `end`, both inclusive
pub fn weekdays_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| WEEKDAYS.contains(&day.weekday()))
        .collect()
}

/// `M-D` labels joined with `|`, as used for chart axes
pub fn weekday_labels(days: &[NaiveDate]) -> String {
    days.iter()
        .map(|day| format!("{}-{}", day.month(), day.day()))
        .collect::<Vec<_>>()
        .join("|")
}
