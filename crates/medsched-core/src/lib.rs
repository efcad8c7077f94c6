//! Core types shared by every medsched crate: configuration, errors, route
//! constants and the meeting/hospital domain model.

pub mod config;
pub mod constants;
pub mod error;
pub mod id;
pub mod model;
pub mod types;
