//! The scheduling operations exposed to the HTTP layer: validated meeting and
//! hospital CRUD, calendar queries and recurrence series creation.

pub mod error;
pub mod scheduler;
pub mod seed;
pub mod validate;

pub use error::{ServiceError, ServiceResult};
pub use scheduler::Scheduler;
pub use validate::ValidationErrors;
