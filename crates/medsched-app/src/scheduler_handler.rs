use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use medsched_core::error::CoreError;
use medsched_service::Scheduler;

/// Makes the process-wide `Scheduler` available to every handler.
pub struct SchedulerHandler {
    pub scheduler: Arc<Scheduler>,
}

#[async_trait]
impl salvo::Handler for SchedulerHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.scheduler));
    }
}

/// ## Summary
/// Retrieves the scheduler from the depot.
///
/// ## Errors
/// Returns an error if no `SchedulerHandler` ran for this request.
pub fn get_scheduler_from_depot(depot: &salvo::Depot) -> AppResult<Arc<Scheduler>> {
    depot
        .obtain::<Arc<Scheduler>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Scheduler not found in depot").into())
}
