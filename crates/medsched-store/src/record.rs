use chrono::{DateTime, Utc};

/// An entity the store can hold.
///
/// The store owns id assignment and the `created_at`/`updated_at` stamps;
/// everything else flows through `Draft` and `Changes`.
pub trait Record: Clone {
    /// Validated data a new record is built from.
    type Draft;
    /// Validated partial update.
    type Changes;

    /// Entity name used in logs and errors.
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn from_draft(id: String, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    fn merge(&mut self, changes: Self::Changes);

    fn set_created_at(&mut self, at: DateTime<Utc>);

    fn set_updated_at(&mut self, at: DateTime<Utc>);
}
