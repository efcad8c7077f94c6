use salvo::writing::Json;
use salvo::{Router, handler};
use serde::Serialize;

use medsched_core::types::{MeetingStatus, StatusDisplay};

/// One status with the badge it is drawn with.
#[derive(Debug, Serialize)]
struct StatusInfo {
    status: MeetingStatus,
    #[serde(flatten)]
    display: StatusDisplay,
}

/// GET /api/app/statuses - every meeting status with its label, color and icon.
#[handler]
async fn list_statuses() -> Json<Vec<StatusInfo>> {
    Json(
        MeetingStatus::ALL
            .into_iter()
            .map(|status| StatusInfo {
                status,
                display: status.display(),
            })
            .collect(),
    )
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("statuses").get(list_statuses)
}
