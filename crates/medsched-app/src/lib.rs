//! HTTP front for the doctor meeting scheduler.

pub mod app;
pub mod error;
pub mod scheduler_handler;
