use chrono::{DateTime, Utc};
use medsched_core::model::{Hospital, HospitalForm, HospitalPatch};

use crate::record::Record;

impl Record for Hospital {
    type Draft = HospitalForm;
    type Changes = HospitalPatch;

    const KIND: &'static str = "hospital";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: HospitalForm, now: DateTime<Utc>) -> Self {
        Hospital::from_form(id, draft, now)
    }

    fn merge(&mut self, changes: HospitalPatch) {
        self.apply(changes);
    }

    fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.created_at = at;
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}
