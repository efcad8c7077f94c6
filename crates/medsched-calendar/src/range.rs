//! Inclusive day ranges and the queries built on them.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use medsched_core::model::Meeting;
use serde::Serialize;

use crate::error::{CalendarError, CalendarResult};

/// Anything placed at a single instant on the calendar.
pub trait Scheduled {
    fn scheduled_at(&self) -> DateTime<Utc>;
}

impl Scheduled for Meeting {
    fn scheduled_at(&self) -> DateTime<Utc> {
        self.date_time
    }
}

/// ## Summary
/// A run of whole days, inclusive on both ends.
///
/// Membership is decided on the local calendar date of an instant, so the
/// range covers `start 00:00:00` through `end 23:59:59` in the zone used for
/// the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// ## Errors
    /// Returns `CalendarError::InvalidRange` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> CalendarResult<Self> {
        if start > end {
            return Err(CalendarError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// ## Summary
    /// The ISO week (Monday through Sunday) containing `reference`.
    ///
    /// ## Errors
    /// Returns `CalendarError::DateOutOfRange` if the week runs past the
    /// representable calendar.
    pub fn iso_week(reference: NaiveDate) -> CalendarResult<Self> {
        let week = reference.week(Weekday::Mon);
        match (week.checked_first_day(), week.checked_last_day()) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            _ => Err(out_of_range("ISO week", reference)),
        }
    }

    /// ## Summary
    /// The ISO week containing the local date of `instant` in `tz`.
    ///
    /// ## Errors
    /// Returns `CalendarError::DateOutOfRange` as `iso_week` does.
    pub fn iso_week_of(instant: DateTime<Utc>, tz: Tz) -> CalendarResult<Self> {
        Self::iso_week(instant.with_timezone(&tz).date_naive())
    }

    /// ## Summary
    /// First through last day of the month containing `reference`.
    ///
    /// ## Errors
    /// Returns `CalendarError::DateOutOfRange` for the last representable
    /// month.
    pub fn month(reference: NaiveDate) -> CalendarResult<Self> {
        let start = reference
            .checked_sub_days(Days::new(u64::from(reference.day0())))
            .ok_or_else(|| out_of_range("month", reference))?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.checked_sub_days(Days::new(1)))
            .ok_or_else(|| out_of_range("month", reference))?;
        Ok(Self { start, end })
    }

    /// ## Errors
    /// Returns `CalendarError::DateOutOfRange` past the end of the calendar.
    pub fn next_week(&self) -> CalendarResult<Self> {
        self.shift_week(|date| date.checked_add_days(Days::new(7)))
    }

    /// ## Errors
    /// Returns `CalendarError::DateOutOfRange` before the start of the calendar.
    pub fn previous_week(&self) -> CalendarResult<Self> {
        self.shift_week(|date| date.checked_sub_days(Days::new(7)))
    }

    fn shift_week(&self, shift: impl Fn(NaiveDate) -> Option<NaiveDate>) -> CalendarResult<Self> {
        match (shift(self.start), shift(self.end)) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            _ => Err(out_of_range("week", self.start)),
        }
    }

    /// ISO week number of the range's first day.
    #[must_use]
    pub fn iso_week_number(&self) -> u32 {
        self.start.iso_week().week()
    }

    /// Every day of the range in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// ## Summary
    /// Whether `instant` falls on one of the range's days in `tz`.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>, tz: Tz) -> bool {
        self.contains_date(instant.with_timezone(&tz).date_naive())
    }
}

fn out_of_range(what: &str, reference: NaiveDate) -> CalendarError {
    CalendarError::DateOutOfRange(format!("{what} containing {reference}"))
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// ## Summary
/// Items whose instant falls within `range`, in input order.
#[must_use]
pub fn filter_in_range<T>(items: &[T], range: &DateRange, tz: Tz) -> Vec<T>
where
    T: Scheduled + Clone,
{
    let matched: Vec<T> = items
        .iter()
        .filter(|item| range.contains(item.scheduled_at(), tz))
        .cloned()
        .collect();
    tracing::trace!(%range, total = items.len(), matched = matched.len(), "Filtered by range");
    matched
}

/// ## Summary
/// Items scheduled during the ISO week containing `reference`.
///
/// ## Errors
/// Returns `CalendarError::DateOutOfRange` as `DateRange::iso_week` does.
pub fn meetings_in_week<T>(items: &[T], reference: NaiveDate, tz: Tz) -> CalendarResult<Vec<T>>
where
    T: Scheduled + Clone,
{
    Ok(filter_in_range(items, &DateRange::iso_week(reference)?, tz))
}
