mod app_specific;
mod hospitals;
mod meetings;
pub mod response;

use salvo::Router;

// Re-export route constants from core
pub use medsched_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, HOSPITALS_ROUTE_COMPONENT, HOSPITALS_ROUTE_PREFIX,
    MEETINGS_ROUTE_COMPONENT, MEETINGS_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the `/api` router: health check, meetings and hospitals.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(meetings::routes())
        .push(hospitals::routes())
}
