use salvo::Router;

use medsched_core::constants::APP_ROUTE_COMPONENT;

mod healthcheck;
mod statuses;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(APP_ROUTE_COMPONENT)
        .push(healthcheck::routes())
        .push(statuses::routes())
}
