use chrono::{DateTime, Days, Months, TimeZone};
use chrono_tz::Tz;
use medsched_core::model::Frequency;

/// ## Summary
/// Local start of occurrence `index` of a series beginning at `start`.
///
/// Each occurrence is offset from `start` itself (`index * interval` units), so
/// clamping to the end of a short month never carries over into later
/// occurrences. Months and years clamp to the last valid day.
///
/// Returns `None` when the frequency does not repeat, `interval` is not
/// positive, the date leaves chrono's range, or the resulting wall-clock time
/// does not exist in the zone. Ambiguous wall-clock times resolve to the
/// earlier instant.
#[must_use]
pub fn nth_occurrence(
    start: DateTime<Tz>,
    frequency: Frequency,
    interval: i32,
    index: u32,
) -> Option<DateTime<Tz>> {
    let interval = u32::try_from(interval).ok().filter(|step| *step > 0)?;
    let units = interval.checked_mul(index)?;
    let local = start.naive_local();

    let shifted = match frequency {
        Frequency::Daily => local.checked_add_days(Days::new(u64::from(units)))?,
        Frequency::Weekly => local.checked_add_days(Days::new(u64::from(units) * 7))?,
        Frequency::Monthly => local.checked_add_months(Months::new(units))?,
        Frequency::Yearly => local.checked_add_months(Months::new(units.checked_mul(12)?))?,
        Frequency::None | Frequency::Unsupported => return None,
    };

    start.timezone().from_local_datetime(&shifted).earliest()
}
