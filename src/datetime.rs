//! Unix timestamp conversion to readable date-time text.
//!
//! Conversion never fails: a value that is not a finite number of epoch
//! seconds, or that falls outside the four-digit-year calendar, renders as
//! `Invalid timestamp: <value>` so one bad cell cannot abort a column.

use crate::constants::{DATETIME_FORMAT, INVALID_TIMESTAMP_PREFIX};
use crate::table::Cell;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use std::fmt::Display;

/// Convert epoch seconds to `YYYY-MM-DD HH:MM:SS` in UTC
pub fn to_datetime(value: &Cell) -> String {
    to_datetime_in(value, &Utc)
}

/// Convert epoch seconds to `YYYY-MM-DD HH:MM:SS` in the given zone
pub fn to_datetime_in<Tz>(value: &Cell, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match epoch_to_datetime(value, zone) {
        Some(datetime) => datetime.format(DATETIME_FORMAT).to_string(),
        None => format!("{}{}", INVALID_TIMESTAMP_PREFIX, value),
    }
}

/// Whether `value` would convert in UTC without producing a diagnostic
pub fn is_valid_timestamp(value: &Cell) -> bool {
    is_valid_timestamp_in(value, &Utc)
}

/// Whether `value` would convert in `zone` without producing a diagnostic.
///
/// The year bounds apply to the local date, so values near 0001-01-01 or
/// 9999-12-31 can be valid in one zone and not in another.
pub fn is_valid_timestamp_in<Tz: TimeZone>(value: &Cell, zone: &Tz) -> bool {
    epoch_to_datetime(value, zone).is_some()
}

/// Element-wise conversion preserving order and length
pub fn to_datetime_column<Tz>(values: &[Cell], zone: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    values
        .iter()
        .map(|value| to_datetime_in(value, zone))
        .collect()
}

fn epoch_to_datetime<Tz: TimeZone>(value: &Cell, zone: &Tz) -> Option<DateTime<Tz>> {
    let seconds = value.as_f64()?;
    let whole = seconds.floor();
    if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
        return None;
    }
    let nanos = (((seconds - whole) * 1e9) as u32).min(999_999_999);

    let datetime = DateTime::from_timestamp(whole as i64, nanos)?.with_timezone(zone);
    (1..=9999).contains(&datetime.year()).then_some(datetime)
}
