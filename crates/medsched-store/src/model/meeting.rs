use chrono::{DateTime, Utc};
use medsched_core::model::{Meeting, MeetingChanges, NewMeeting};

use crate::record::Record;

impl Record for Meeting {
    type Draft = NewMeeting;
    type Changes = MeetingChanges;

    const KIND: &'static str = "meeting";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewMeeting, now: DateTime<Utc>) -> Self {
        Meeting::from_new(id, draft, now)
    }

    fn merge(&mut self, changes: MeetingChanges) {
        self.apply(changes);
    }

    fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.created_at = at;
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}
