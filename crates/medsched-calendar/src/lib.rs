//! Calendar logic for meetings: range queries, recurrence expansion, date
//! parsing, list filters and summaries.
//!
//! Everything here is pure. Day boundaries and calendar arithmetic are computed
//! in a caller-supplied [`chrono_tz::Tz`].

pub mod error;
pub mod filter;
pub mod parse;
pub mod range;
pub mod recurrence;
pub mod summary;

pub use error::{CalendarError, CalendarResult};
pub use filter::{HospitalFilter, MeetingFilter};
pub use range::{DateRange, Scheduled, filter_in_range, meetings_in_week};
pub use recurrence::RecurrenceExpander;
pub use summary::{
    DaySchedule, WeekView, WeeklySummary, group_by_day, next_up, sort_by_date_time,
};
