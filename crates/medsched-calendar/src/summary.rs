//! Aggregates over meeting lists: weekly counts, the next appointment, and the
//! per-day buckets of the week view.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use medsched_core::model::Meeting;
use medsched_core::types::MeetingStatus;
use serde::Serialize;

use crate::error::CalendarResult;
use crate::range::DateRange;

/// Meeting counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub total: usize,
    pub scheduled: usize,
    pub done: usize,
    pub canceled: usize,
}

impl WeeklySummary {
    #[must_use]
    pub fn from_meetings(meetings: &[Meeting]) -> Self {
        meetings
            .iter()
            .fold(Self::default(), |mut summary, meeting| {
                summary.total += 1;
                match meeting.status {
                    MeetingStatus::Scheduled => summary.scheduled += 1,
                    MeetingStatus::Done => summary.done += 1,
                    MeetingStatus::Canceled => summary.canceled += 1,
                }
                summary
            })
    }
}

/// One column of the week view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub meetings: Vec<Meeting>,
}

/// Orders meetings by start time, earliest first. Ties keep their order.
pub fn sort_by_date_time(meetings: &mut [Meeting]) {
    meetings.sort_by_key(|meeting| meeting.date_time);
}

/// ## Summary
/// The earliest still-scheduled meeting starting strictly after `now`.
#[must_use]
pub fn next_up(meetings: &[Meeting], now: DateTime<Utc>) -> Option<Meeting> {
    meetings
        .iter()
        .filter(|meeting| meeting.status == MeetingStatus::Scheduled && meeting.date_time > now)
        .min_by_key(|meeting| meeting.date_time)
        .cloned()
}

/// ## Summary
/// Buckets meetings by their local day in `tz`, one bucket per day of `range`
/// (empty days included), each sorted by start time.
///
/// Meetings outside the range are dropped.
#[must_use]
pub fn group_by_day(meetings: &[Meeting], range: &DateRange, tz: Tz) -> Vec<DaySchedule> {
    range
        .days()
        .map(|date| {
            let mut day: Vec<Meeting> = meetings
                .iter()
                .filter(|meeting| meeting.date_time.with_timezone(&tz).date_naive() == date)
                .cloned()
                .collect();
            sort_by_date_time(&mut day);
            DaySchedule {
                date,
                meetings: day,
            }
        })
        .collect()
}

/// ## Summary
/// Everything the week page shows: the day columns, status counts, the ISO
/// week number and the Mondays of the neighbouring weeks.
///
/// A neighbour is `None` at the edge of the representable calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekView {
    pub range: DateRange,
    pub week_number: u32,
    pub previous_week_start: Option<NaiveDate>,
    pub next_week_start: Option<NaiveDate>,
    pub summary: WeeklySummary,
    pub days: Vec<DaySchedule>,
}

impl WeekView {
    /// ## Summary
    /// Builds the view of the ISO week containing `reference` from
    /// `meetings`; meetings outside the week are ignored.
    ///
    /// ## Errors
    /// Returns `CalendarError::DateOutOfRange` if the week itself cannot be
    /// represented.
    pub fn build(meetings: &[Meeting], reference: NaiveDate, tz: Tz) -> CalendarResult<Self> {
        let range = DateRange::iso_week(reference)?;
        let days = group_by_day(meetings, &range, tz);
        let in_week: Vec<Meeting> = days
            .iter()
            .flat_map(|day| day.meetings.iter().cloned())
            .collect();

        Ok(Self {
            range,
            week_number: range.iso_week_number(),
            previous_week_start: range.previous_week().ok().map(|week| week.start),
            next_week_start: range.next_week().ok().map(|week| week.start),
            summary: WeeklySummary::from_meetings(&in_week),
            days,
        })
    }
}
