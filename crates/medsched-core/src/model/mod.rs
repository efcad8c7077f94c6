pub mod hospital;
pub mod meeting;
pub mod recurrence;

pub use hospital::{Coordinates, Hospital, HospitalForm, HospitalPatch};
pub use meeting::{Meeting, MeetingChanges, MeetingForm, MeetingPatch, NewMeeting};
pub use recurrence::{Frequency, Recurrence, RecurrenceRule};
