//! In-memory record store keyed by id.

pub mod error;
pub mod model;
pub mod record;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use record::Record;
pub use store::RecordStore;
