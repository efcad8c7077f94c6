//! Doctor meeting scheduler - integration test support.
//!
//! Re-exports the workspace crates so integration tests can use
//! `medsched_test::` paths.

pub use medsched_app::app;
pub use medsched_app::scheduler_handler::SchedulerHandler;

pub mod component {
    pub use medsched_calendar as calendar;
    pub use medsched_core::{config, constants, model, types};
    pub use medsched_service::{Scheduler, ServiceError, seed};
}
