use medsched_core::error::CoreError;
use thiserror::Error;

/// Calendar errors
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Local time {0} does not exist in {1}")]
    NonexistentLocalTime(String, String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("Invalid range: {start} is after {end}")]
    InvalidRange { start: String, end: String },

    #[error(transparent)]
    CoreError(#[from] CoreError),
}

pub type CalendarResult<T> = std::result::Result<T, CalendarError>;
