//! Deterministic demo data for the in-memory backend.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use medsched_calendar::parse::localize;
use medsched_calendar::range::DateRange;
use medsched_core::id::new_record_id;
use medsched_core::model::{Coordinates, Hospital, Meeting, NewMeeting, Recurrence};
use medsched_core::types::MeetingStatus;

const DEMO_HOSPITALS: [(&str, &str, &str, &str, f64, f64); 5] = [
    (
        "hospital-1",
        "St. Mary Medical Center",
        "1234 Healthcare Avenue",
        "San Francisco",
        37.7749,
        -122.4194,
    ),
    (
        "hospital-2",
        "General Hospital",
        "5678 Medical Drive",
        "Los Angeles",
        34.0522,
        -118.2437,
    ),
    (
        "hospital-3",
        "City Regional Medical Center",
        "9101 Hospital Boulevard",
        "San Diego",
        32.7157,
        -117.1611,
    ),
    (
        "hospital-4",
        "Community Health Hospital",
        "1122 Wellness Street",
        "Sacramento",
        38.5816,
        -121.4944,
    ),
    (
        "hospital-5",
        "Metropolitan Medical Complex",
        "3344 Care Center Road",
        "San Jose",
        37.3382,
        -121.8863,
    ),
];

const DOCTOR_NAMES: [&str; 15] = [
    "Dr. Sarah Johnson",
    "Dr. Michael Chen",
    "Dr. Emily Rodriguez",
    "Dr. David Kim",
    "Dr. Jennifer Martinez",
    "Dr. Robert Taylor",
    "Dr. Lisa Anderson",
    "Dr. James Wilson",
    "Dr. Maria Garcia",
    "Dr. Christopher Lee",
    "Dr. Amanda White",
    "Dr. Daniel Brown",
    "Dr. Jessica Davis",
    "Dr. Kevin Thompson",
    "Dr. Rachel Miller",
];

const MEETING_PURPOSES: [&str; 10] = [
    "Regular Check-up",
    "Follow-up Consultation",
    "Surgery Planning",
    "Treatment Review",
    "Patient Evaluation",
    "Consultation",
    "Emergency Case Review",
    "Preventive Care",
    "Lab Results Discussion",
    "Prescription Review",
];

const WORKDAYS: u64 = 5;
const FIRST_SLOT_HOUR: u32 = 6;
const SLOT_WINDOW_MINUTES: u32 = 15 * 60;
const FOLLOW_UP_NOTE: &str = "Important meeting requiring follow-up";

/// The five demo hospitals, created at 2024-01-01.
#[must_use]
pub fn demo_hospitals() -> Vec<Hospital> {
    let created_at = NaiveDate::from_ymd_opt(2024, 1, 1)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .unwrap_or_default();

    DEMO_HOSPITALS
        .iter()
        .map(|&(id, name, address, city, lat, lng)| Hospital {
            id: id.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            city: city.to_string(),
            coordinates: Some(Coordinates { lat, lng }),
            created_at,
            updated_at: created_at,
        })
        .collect()
}

/// ## Summary
/// `per_day` meetings on each weekday (Monday to Friday) of the week
/// containing `now`, spread evenly from 06:00 over fifteen hours local time.
///
/// Doctors, hospitals and purposes rotate in order. Meetings already in the
/// past are marked done, except every fifth which stays scheduled; about a
/// third carry a follow-up note. Sorted by start time.
#[must_use]
pub fn weekday_meetings(
    hospitals: &[Hospital],
    per_day: u32,
    now: DateTime<Utc>,
    tz: Tz,
) -> Vec<Meeting> {
    if hospitals.is_empty() || per_day == 0 {
        return Vec::new();
    }

    let monday = match DateRange::iso_week_of(now, tz) {
        Ok(week) => week.start,
        Err(err) => {
            tracing::warn!(%err, %now, "No demo week around the current date");
            return Vec::new();
        }
    };
    let minutes_per_slot = SLOT_WINDOW_MINUTES / per_day;
    let mut meetings = Vec::new();
    let mut index = 0_usize;

    for day in (0..WORKDAYS).map(|offset| monday + Days::new(offset)) {
        for slot in 0..per_day {
            let minutes = slot * minutes_per_slot;
            let Some(local) = NaiveTime::from_hms_opt(
                FIRST_SLOT_HOUR + minutes / 60,
                minutes % 60,
                0,
            )
            .map(|time| day.and_time(time)) else {
                continue;
            };
            let Ok(date_time) = localize(local, tz) else {
                tracing::trace!(%local, "Skipping demo slot missing from local time");
                continue;
            };

            let hospital = &hospitals[index % hospitals.len()];
            let status = if date_time < now && index % 5 != 4 {
                MeetingStatus::Done
            } else {
                MeetingStatus::Scheduled
            };

            meetings.push(Meeting::from_new(
                new_record_id(),
                NewMeeting {
                    doctor_name: DOCTOR_NAMES[index % DOCTOR_NAMES.len()].to_string(),
                    hospital_id: hospital.id.clone(),
                    hospital_name: hospital.name.clone(),
                    hospital_address: hospital.full_address(),
                    date_time,
                    status,
                    purpose: Some(MEETING_PURPOSES[index % MEETING_PURPOSES.len()].to_string()),
                    notes: (index % 10 >= 7).then(|| FOLLOW_UP_NOTE.to_string()),
                    recurrence: Recurrence::Single,
                },
                now,
            ));
            index += 1;
        }
    }

    meetings.sort_by_key(|meeting| meeting.date_time);
    tracing::debug!(count = meetings.len(), %monday, "Generated demo meetings");
    meetings
}
