//! Validation and sanitising of client-submitted forms.
//!
//! Every check runs before anything is written, and all violations are
//! reported together.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use medsched_calendar::parse::parse_date_time;
use medsched_core::constants::{DOCTOR_NAME_MIN_LEN, HOSPITAL_NAME_MIN_LEN, NOTES_MAX_LEN};
use medsched_core::model::{
    Coordinates, HospitalForm, HospitalPatch, MeetingChanges, MeetingForm, MeetingPatch,
    NewMeeting, Recurrence, RecurrenceRule,
};
use thiserror::Error;

/// Every rule a submitted form broke, in check order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed: {}", .0.join("; "))]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    fn check(errors: Vec<String>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(?errors, "Rejected form");
            Err(Self(errors))
        }
    }
}

/// ## Summary
/// Strips angle brackets and collapses runs of whitespace to one space.
#[must_use]
pub fn sanitize_text(input: &str) -> String {
    input
        .replace(['<', '>'], "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn sanitize_optional(input: Option<String>) -> Option<String> {
    input
        .map(|text| sanitize_text(&text))
        .filter(|text| !text.is_empty())
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn check_doctor_name(name: &str, errors: &mut Vec<String>) {
    if name.is_empty() {
        errors.push("Doctor name is required".to_string());
    } else if char_len(name) < DOCTOR_NAME_MIN_LEN {
        errors.push(format!(
            "Doctor name must be at least {DOCTOR_NAME_MIN_LEN} characters"
        ));
    }
}

fn check_notes(notes: Option<&str>, errors: &mut Vec<String>) {
    if notes.is_some_and(|notes| char_len(notes) > NOTES_MAX_LEN) {
        errors.push(format!("Notes cannot exceed {NOTES_MAX_LEN} characters"));
    }
}

fn check_date_time(input: &str, tz: Tz, errors: &mut Vec<String>) -> Option<DateTime<Utc>> {
    if input.trim().is_empty() {
        errors.push("Date and time are required".to_string());
        return None;
    }
    match parse_date_time(input, tz) {
        Ok(date_time) => Some(date_time),
        Err(err) => {
            tracing::trace!(%err, "Unparseable meeting date");
            errors.push("Invalid date/time format".to_string());
            None
        }
    }
}

/// ## Summary
/// Checks the bounds of a recurrence rule against the meeting it starts at.
///
/// The expander itself tolerates all of these; they are rejected here so that
/// a stored rule always describes at least one instance.
pub fn check_recurrence(
    rule: &RecurrenceRule,
    starts_at: Option<DateTime<Utc>>,
    max_occurrences: u32,
    errors: &mut Vec<String>,
) {
    if rule.interval < 1 {
        errors.push("Recurrence interval must be at least 1".to_string());
    }
    match rule.count {
        Some(0) => errors.push("Recurrence count must be at least 1".to_string()),
        Some(count) if count > max_occurrences => {
            errors.push(format!(
                "Recurrence count cannot exceed {max_occurrences} occurrences"
            ));
        }
        _ => {}
    }
    if rule.count.is_some() && rule.end_date.is_some() {
        errors.push("Recurrence cannot have both an end date and a count".to_string());
    }
    if let (Some(end), Some(start)) = (rule.end_date, starts_at)
        && end < start
    {
        errors.push("Recurrence end date cannot be before the meeting date".to_string());
    }
}

/// ## Summary
/// Validates and sanitises a new meeting.
///
/// Hospital name and address are passed through as given (possibly empty);
/// the caller fills them from the hospital record.
///
/// ## Errors
/// Returns every violated rule if any check fails.
pub fn validate_meeting_form(
    form: MeetingForm,
    tz: Tz,
    max_occurrences: u32,
) -> Result<NewMeeting, ValidationErrors> {
    let mut errors = Vec::new();

    let doctor_name = sanitize_text(&form.doctor_name);
    check_doctor_name(&doctor_name, &mut errors);

    let hospital_id = form.hospital_id.trim().to_string();
    if hospital_id.is_empty() {
        errors.push("Hospital is required".to_string());
    }

    let date_time = check_date_time(&form.date_time, tz, &mut errors);

    let notes = sanitize_optional(form.notes);
    check_notes(notes.as_deref(), &mut errors);

    if let Some(rule) = &form.recurrence {
        check_recurrence(rule, date_time, max_occurrences, &mut errors);
    }

    ValidationErrors::check(errors)?;
    let Some(date_time) = date_time else {
        return Err(ValidationErrors(vec!["Date and time are required".to_string()]));
    };

    Ok(NewMeeting {
        doctor_name,
        hospital_id,
        hospital_name: sanitize_text(&form.hospital_name),
        hospital_address: sanitize_text(&form.hospital_address),
        date_time,
        status: form.status.unwrap_or_default(),
        purpose: sanitize_optional(form.purpose),
        notes,
        recurrence: Recurrence::from(form.recurrence),
    })
}

/// ## Summary
/// Validates and sanitises a partial meeting update. Only present fields are
/// checked.
///
/// ## Errors
/// Returns every violated rule if any check fails.
pub fn validate_meeting_patch(
    patch: MeetingPatch,
    tz: Tz,
) -> Result<MeetingChanges, ValidationErrors> {
    let mut errors = Vec::new();

    let doctor_name = patch.doctor_name.map(|name| sanitize_text(&name));
    if let Some(name) = &doctor_name {
        check_doctor_name(name, &mut errors);
    }

    let hospital_id = patch.hospital_id.map(|id| id.trim().to_string());
    if hospital_id.as_deref().is_some_and(str::is_empty) {
        errors.push("Hospital is required".to_string());
    }

    let date_time = patch
        .date_time
        .and_then(|input| check_date_time(&input, tz, &mut errors));

    let notes = patch.notes.map(|notes| sanitize_text(&notes));
    check_notes(notes.as_deref(), &mut errors);

    ValidationErrors::check(errors)?;

    Ok(MeetingChanges {
        doctor_name,
        hospital_id,
        hospital_name: sanitize_optional(patch.hospital_name),
        hospital_address: sanitize_optional(patch.hospital_address),
        date_time,
        status: patch.status,
        purpose: patch.purpose.map(|purpose| sanitize_text(&purpose)),
        notes,
    })
}

fn check_hospital_name(name: &str, errors: &mut Vec<String>) {
    if name.is_empty() {
        errors.push("Hospital name is required".to_string());
    } else if char_len(name) < HOSPITAL_NAME_MIN_LEN {
        errors.push(format!(
            "Hospital name must be at least {HOSPITAL_NAME_MIN_LEN} characters"
        ));
    }
}

fn check_coordinates(coordinates: Option<&Coordinates>, errors: &mut Vec<String>) {
    let Some(coordinates) = coordinates else {
        return;
    };
    if !(-90.0..=90.0).contains(&coordinates.lat) {
        errors.push("Latitude must be between -90 and 90".to_string());
    }
    if !(-180.0..=180.0).contains(&coordinates.lng) {
        errors.push("Longitude must be between -180 and 180".to_string());
    }
}

/// ## Summary
/// Validates and sanitises a new hospital.
///
/// ## Errors
/// Returns every violated rule if any check fails.
pub fn validate_hospital_form(form: HospitalForm) -> Result<HospitalForm, ValidationErrors> {
    let mut errors = Vec::new();

    let name = sanitize_text(&form.name);
    check_hospital_name(&name, &mut errors);

    let address = sanitize_text(&form.address);
    if address.is_empty() {
        errors.push("Address is required".to_string());
    }

    let city = sanitize_text(&form.city);
    if city.is_empty() {
        errors.push("City is required".to_string());
    }

    check_coordinates(form.coordinates.as_ref(), &mut errors);

    ValidationErrors::check(errors)?;

    Ok(HospitalForm {
        name,
        address,
        city,
        coordinates: form.coordinates,
    })
}

/// ## Errors
/// Returns every violated rule if any present field is invalid.
pub fn validate_hospital_patch(patch: HospitalPatch) -> Result<HospitalPatch, ValidationErrors> {
    let mut errors = Vec::new();

    let name = patch.name.map(|name| sanitize_text(&name));
    if let Some(name) = &name {
        check_hospital_name(name, &mut errors);
    }

    let address = patch.address.map(|address| sanitize_text(&address));
    if address.as_deref().is_some_and(str::is_empty) {
        errors.push("Address is required".to_string());
    }

    let city = patch.city.map(|city| sanitize_text(&city));
    if city.as_deref().is_some_and(str::is_empty) {
        errors.push("City is required".to_string());
    }

    check_coordinates(patch.coordinates.as_ref(), &mut errors);

    ValidationErrors::check(errors)?;

    Ok(HospitalPatch {
        name,
        address,
        city,
        coordinates: patch.coordinates,
    })
}
