// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar instants as floating point seconds.
//!
//! The engine does all of its arithmetic in `f64` seconds since the Unix
//! epoch. Chrono is only consulted at the boundaries: parsing record
//! timestamps and aligning ticks to calendar units.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

/// Seconds since the Unix epoch (UTC), as a floating point number.
pub type Seconds = f64;

/// Seconds in one minute.
pub const MINUTE: Seconds = 60.0;
/// Seconds in one hour.
pub const HOUR: Seconds = 3_600.0;
/// Seconds in one day.
pub const DAY: Seconds = 86_400.0;
/// Seconds in one week.
pub const WEEK: Seconds = 7.0 * DAY;
/// Average length of a Gregorian year in seconds.
pub const YEAR: Seconds = 365.2425 * DAY;
/// Average length of a Gregorian month in seconds.
pub const MONTH: Seconds = YEAR / 12.0;

/// Errors produced while parsing a record timestamp.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    /// The timestamp string was empty or whitespace.
    #[error("timestamp is empty")]
    Empty,
    /// The timestamp did not match any accepted format.
    #[error("unrecognized timestamp `{0}`")]
    Unrecognized(String),
    /// The timestamp parsed but lies outside chrono's representable range.
    #[error("timestamp `{0}` is out of range")]
    OutOfRange(String),
}

/// Parses a record timestamp into seconds since the Unix epoch.
///
/// Accepted forms, tried in order:
/// - RFC 3339 with an explicit offset (`2021-03-04T05:06:07+02:00`, `...Z`).
/// - A naive date-time, interpreted as UTC (`2021-03-04T05:06:07`,
///   `2021-03-04 05:06:07`, optional fractional seconds).
/// - A bare date, interpreted as UTC midnight (`2021-03-04`).
pub fn parse_timestamp(raw: &str) -> Result<Seconds, TimestampError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TimestampError::Empty);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime_to_seconds(&dt.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(datetime_to_seconds(&naive.and_utc()));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| TimestampError::OutOfRange(raw.to_owned()))?;
        return Ok(datetime_to_seconds(&midnight.and_utc()));
    }
    Err(TimestampError::Unrecognized(raw.to_owned()))
}

/// Converts a chrono date-time into seconds since the Unix epoch.
#[must_use]
pub fn datetime_to_seconds<Tz: chrono::TimeZone>(dt: &DateTime<Tz>) -> Seconds {
    dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9
}

/// Converts seconds since the Unix epoch into a date-time in `offset`.
///
/// Returns `None` for non-finite input or instants chrono cannot represent.
#[must_use]
pub fn seconds_to_datetime(t: Seconds, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if !t.is_finite() {
        return None;
    }
    let whole = t.floor();
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }
    let nanos = ((t - whole) * 1e9).round().clamp(0.0, 999_999_999.0);
    #[expect(clippy::cast_possible_truncation, reason = "range checked above")]
    let secs = whole as i64;
    #[expect(clippy::cast_possible_truncation, reason = "clamped to below 1e9")]
    let nanos = nanos as u32;
    DateTime::<Utc>::from_timestamp(secs, nanos).map(|dt| dt.with_timezone(&offset))
}

/// Returns a fixed offset east of UTC, falling back to UTC when out of range.
#[must_use]
pub fn fixed_offset(utc_offset_seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(utc_offset_seconds).unwrap_or_else(|| Utc.fix())
}
