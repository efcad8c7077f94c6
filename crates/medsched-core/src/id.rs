use uuid::Uuid;

/// ## Summary
/// Generates a new record identifier.
///
/// UUIDv7 carries a millisecond timestamp followed by random bits, so ids sort
/// by creation time and collisions are negligible.
#[must_use]
pub fn new_record_id() -> String {
    Uuid::now_v7().to_string()
}
