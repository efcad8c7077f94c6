use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::recurrence::{Recurrence, RecurrenceRule};
use crate::types::MeetingStatus;

/// A scheduled appointment with a doctor at a hospital.
///
/// Hospital name and address are denormalized copies taken when the meeting is
/// written; they are not kept in sync with the hospital record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub doctor_name: String,
    pub hospital_id: String,
    pub hospital_name: String,
    pub hospital_address: String,
    pub date_time: DateTime<Utc>,
    pub status: MeetingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Recurrence::is_single")]
    pub recurrence: Recurrence,
    /// Base meeting this instance was generated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Meeting {
    #[must_use]
    pub fn from_new(id: String, new: NewMeeting, now: DateTime<Utc>) -> Self {
        Self {
            id,
            doctor_name: new.doctor_name,
            hospital_id: new.hospital_id,
            hospital_name: new.hospital_name,
            hospital_address: new.hospital_address,
            date_time: new.date_time,
            status: new.status,
            purpose: new.purpose,
            notes: new.notes,
            recurrence: new.recurrence,
            parent_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges every field present in `changes`; absent fields are untouched.
    pub fn apply(&mut self, changes: MeetingChanges) {
        if let Some(doctor_name) = changes.doctor_name {
            self.doctor_name = doctor_name;
        }
        if let Some(hospital_id) = changes.hospital_id {
            self.hospital_id = hospital_id;
        }
        if let Some(hospital_name) = changes.hospital_name {
            self.hospital_name = hospital_name;
        }
        if let Some(hospital_address) = changes.hospital_address {
            self.hospital_address = hospital_address;
        }
        if let Some(date_time) = changes.date_time {
            self.date_time = date_time;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(purpose) = changes.purpose {
            self.purpose = Some(purpose);
        }
        if let Some(notes) = changes.notes {
            self.notes = Some(notes);
        }
    }
}

/// Validated meeting data ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeeting {
    pub doctor_name: String,
    pub hospital_id: String,
    pub hospital_name: String,
    pub hospital_address: String,
    pub date_time: DateTime<Utc>,
    pub status: MeetingStatus,
    pub purpose: Option<String>,
    pub notes: Option<String>,
    pub recurrence: Recurrence,
}

/// Validated partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingChanges {
    pub doctor_name: Option<String>,
    pub hospital_id: Option<String>,
    pub hospital_name: Option<String>,
    pub hospital_address: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    pub status: Option<MeetingStatus>,
    pub purpose: Option<String>,
    pub notes: Option<String>,
}

impl MeetingChanges {
    #[must_use]
    pub fn status(status: MeetingStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Meeting data as submitted by a client.
///
/// Every field is optional on the wire so that missing values are reported by
/// validation rather than by deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingForm {
    pub doctor_name: String,
    pub hospital_id: String,
    pub hospital_name: String,
    pub hospital_address: String,
    pub date_time: String,
    pub notes: Option<String>,
    pub purpose: Option<String>,
    pub status: Option<MeetingStatus>,
    pub recurrence: Option<RecurrenceRule>,
}

/// Partial meeting update as submitted by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingPatch {
    pub doctor_name: Option<String>,
    pub hospital_id: Option<String>,
    pub hospital_name: Option<String>,
    pub hospital_address: Option<String>,
    pub date_time: Option<String>,
    pub notes: Option<String>,
    pub purpose: Option<String>,
    pub status: Option<MeetingStatus>,
}
