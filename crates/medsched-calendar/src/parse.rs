//! Parsing of client-supplied dates and date-times.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{CalendarError, CalendarResult};

const LOCAL_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// ## Summary
/// Resolves a local wall-clock time in `tz` to an instant.
///
/// Ambiguous times (clocks turned back) resolve to the earlier instant.
///
/// ## Errors
/// Returns `CalendarError::NonexistentLocalTime` when the time falls in a gap.
pub fn localize(naive: NaiveDateTime, tz: Tz) -> CalendarResult<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| CalendarError::NonexistentLocalTime(naive.to_string(), tz.to_string()))
}

/// ## Summary
/// Parses a meeting date-time.
///
/// Accepts an RFC 3339 instant (`2024-03-04T09:00:00Z`), a local date-time
/// (`2024-03-04T09:00`, seconds optional) interpreted in `tz`, or a bare date
/// meaning local midnight.
///
/// ## Errors
/// Returns `CalendarError::InvalidDate` if no accepted format matches.
pub fn parse_date_time(input: &str, tz: Tz) -> CalendarResult<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&Utc));
    }

    if let Some(naive) = LOCAL_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
    {
        return localize(naive, tz);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return localize(date.and_time(NaiveTime::MIN), tz);
    }

    Err(CalendarError::InvalidDate(input.to_string()))
}

/// ## Summary
/// Parses a calendar date, used as the reference day of range queries.
///
/// An RFC 3339 instant is accepted and converted to its local date in `tz`.
///
/// ## Errors
/// Returns `CalendarError::InvalidDate` if the input is neither a date nor an
/// RFC 3339 instant.
pub fn parse_date(input: &str, tz: Tz) -> CalendarResult<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(input)
        .map(|instant| instant.with_timezone(&tz).date_naive())
        .map_err(|err| CalendarError::InvalidDate(format!("{input} ({err})")))
}
