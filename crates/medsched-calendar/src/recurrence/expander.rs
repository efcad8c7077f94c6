use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use medsched_core::config::CalendarConfig;
use medsched_core::constants::DEFAULT_MAX_OCCURRENCES;
use medsched_core::id::new_record_id;
use medsched_core::model::{Meeting, Recurrence, RecurrenceRule};

use super::step::nth_occurrence;
use crate::error::CalendarResult;

/// ## Summary
/// Turns a base meeting and its rule into the bounded, ordered list of
/// meetings making up the series.
///
/// The first element is always the base meeting itself, unchanged. Later
/// elements are copies with a fresh id, `parent_id` set to the base id, and no
/// rule of their own.
///
/// A series stops at the first of:
/// - `count` instances (the base included), never more than
///   `max_occurrences`;
/// - the first occurrence after `end_date`;
/// - a frequency that does not repeat, or a non-positive interval (base only);
/// - a date that cannot be represented in the zone.
#[derive(Debug, Clone, Copy)]
pub struct RecurrenceExpander {
    tz: Tz,
    max_occurrences: u32,
}

impl Default for RecurrenceExpander {
    fn default() -> Self {
        Self::new(chrono_tz::UTC, DEFAULT_MAX_OCCURRENCES)
    }
}

impl RecurrenceExpander {
    #[must_use]
    pub const fn new(tz: Tz, max_occurrences: u32) -> Self {
        Self {
            tz,
            max_occurrences,
        }
    }

    /// ## Errors
    /// Returns an error if the configured timezone is unknown.
    pub fn from_config(config: &CalendarConfig) -> CalendarResult<Self> {
        Ok(Self::new(config.tz()?, config.max_occurrences))
    }

    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.tz
    }

    #[must_use]
    pub const fn max_occurrences(&self) -> u32 {
        self.max_occurrences
    }

    /// ## Summary
    /// Start instants of every occurrence of `rule` beginning at `start`.
    #[must_use]
    pub fn occurrence_dates(
        &self,
        start: DateTime<Utc>,
        rule: &RecurrenceRule,
    ) -> Vec<DateTime<Utc>> {
        let limit = rule
            .count
            .map_or(self.max_occurrences, |count| count.min(self.max_occurrences));
        let within_end = |at: DateTime<Utc>| rule.end_date.is_none_or(|end| at <= end);

        let mut dates = Vec::new();
        if limit == 0 || !within_end(start) {
            tracing::debug!(%start, ?rule, "Recurrence produces no occurrences");
            return dates;
        }
        dates.push(start);

        if !rule.frequency.repeats() {
            tracing::trace!(frequency = ?rule.frequency, "Frequency does not repeat");
            return dates;
        }
        if rule.interval <= 0 {
            tracing::warn!(
                interval = rule.interval,
                "Non-positive recurrence interval, keeping only the first occurrence"
            );
            return dates;
        }

        let local_start = start.with_timezone(&self.tz);
        let mut reached_limit = true;
        for index in 1..limit {
            let Some(next) = nth_occurrence(local_start, rule.frequency, rule.interval, index)
            else {
                tracing::warn!(
                    %start,
                    index,
                    frequency = ?rule.frequency,
                    tz = %self.tz,
                    "Occurrence cannot be represented, ending series early"
                );
                reached_limit = false;
                break;
            };
            let next = next.with_timezone(&Utc);
            if !within_end(next) {
                reached_limit = false;
                break;
            }
            tracing::trace!(index, at = %next, "Generated occurrence");
            dates.push(next);
        }

        let truncated = reached_limit
            && match rule.count {
                Some(count) => count > self.max_occurrences,
                None => {
                    rule.end_date.is_some()
                        && nth_occurrence(local_start, rule.frequency, rule.interval, limit)
                            .is_some_and(|next| within_end(next.with_timezone(&Utc)))
                }
            };
        if truncated {
            tracing::warn!(
                %start,
                ?rule,
                max_occurrences = self.max_occurrences,
                "Recurrence truncated at the occurrence cap"
            );
        }

        tracing::debug!(%start, occurrences = dates.len(), "Expanded recurrence");
        dates
    }

    /// ## Summary
    /// Expands `base` according to `rule` into the full series.
    ///
    /// Pure apart from logging and id generation; nothing is stored.
    #[must_use]
    pub fn expand(&self, base: &Meeting, rule: &RecurrenceRule) -> Vec<Meeting> {
        self.occurrence_dates(base.date_time, rule)
            .into_iter()
            .enumerate()
            .map(|(index, date_time)| {
                if index == 0 {
                    base.clone()
                } else {
                    Meeting {
                        id: new_record_id(),
                        date_time,
                        recurrence: Recurrence::Single,
                        parent_id: Some(base.id.clone()),
                        ..base.clone()
                    }
                }
            })
            .collect()
    }

    /// Expands `base` by its own rule; a single meeting expands to itself.
    #[must_use]
    pub fn expand_meeting(&self, base: &Meeting) -> Vec<Meeting> {
        match &base.recurrence {
            Recurrence::Single => vec![base.clone()],
            Recurrence::Recurring(rule) => self.expand(base, rule),
        }
    }
}
