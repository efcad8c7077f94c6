use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] medsched_service::error::ServiceError),

    #[error(transparent)]
    CalendarError(#[from] medsched_calendar::CalendarError),

    #[error(transparent)]
    CoreError(#[from] medsched_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
