use thiserror::Error;

use crate::validate::ValidationErrors;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    StoreError(#[from] medsched_store::StoreError),

    #[error(transparent)]
    CalendarError(#[from] medsched_calendar::CalendarError),

    #[error(transparent)]
    CoreError(#[from] medsched_core::error::CoreError),

    #[error(transparent)]
    ValidationError(#[from] ValidationErrors),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
