//! List filters for the dashboard's search boxes and dropdowns.

use medsched_core::model::{Hospital, Meeting};
use medsched_core::types::StatusFilter;

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn normalized(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .map(str::to_lowercase)
}

/// ## Summary
/// Criteria for narrowing a meeting list. Every set criterion must match.
///
/// - `query`: case-insensitive substring of the doctor name, hospital name,
///   hospital address, purpose or notes.
/// - `doctor`: case-insensitive substring of the doctor name.
/// - `hospital_id`: exact hospital id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingFilter {
    pub query: Option<String>,
    pub status: StatusFilter,
    pub hospital_id: Option<String>,
    pub doctor: Option<String>,
}

impl MeetingFilter {
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn matches(&self, meeting: &Meeting) -> bool {
        if !self.status.matches(meeting.status) {
            return false;
        }
        if self
            .hospital_id
            .as_deref()
            .is_some_and(|hospital_id| meeting.hospital_id != hospital_id)
        {
            return false;
        }
        if normalized(self.doctor.as_deref())
            .is_some_and(|doctor| !contains_ignore_case(&meeting.doctor_name, &doctor))
        {
            return false;
        }
        normalized(self.query.as_deref()).is_none_or(|query| matches_query(meeting, &query))
    }

    #[must_use]
    pub fn apply(&self, meetings: &[Meeting]) -> Vec<Meeting> {
        meetings
            .iter()
            .filter(|meeting| self.matches(meeting))
            .cloned()
            .collect()
    }
}

fn matches_query(meeting: &Meeting, query: &str) -> bool {
    [
        Some(meeting.doctor_name.as_str()),
        Some(meeting.hospital_name.as_str()),
        Some(meeting.hospital_address.as_str()),
        meeting.purpose.as_deref(),
        meeting.notes.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| contains_ignore_case(field, query))
}

/// Criteria for narrowing a hospital list.
///
/// `query` searches name, address and city; `city` is an exact,
/// case-insensitive match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HospitalFilter {
    pub query: Option<String>,
    pub city: Option<String>,
}

impl HospitalFilter {
    #[must_use]
    pub fn matches(&self, hospital: &Hospital) -> bool {
        if self
            .city
            .as_deref()
            .map(str::trim)
            .is_some_and(|city| !hospital.city.eq_ignore_ascii_case(city))
        {
            return false;
        }
        normalized(self.query.as_deref()).is_none_or(|query| {
            [&hospital.name, &hospital.address, &hospital.city]
                .into_iter()
                .any(|field| contains_ignore_case(field, &query))
        })
    }

    #[must_use]
    pub fn apply(&self, hospitals: &[Hospital]) -> Vec<Hospital> {
        hospitals
            .iter()
            .filter(|hospital| self.matches(hospital))
            .cloned()
            .collect()
    }
}
