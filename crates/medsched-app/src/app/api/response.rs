//! JSON bodies and helpers shared by the API handlers.

use std::sync::Arc;

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::scheduler_handler::get_scheduler_from_depot;
use medsched_service::{Scheduler, ServiceError};

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ## Summary
/// Validation failure payload, one message per broken rule.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

pub fn render_error(res: &mut Response, status: StatusCode, message: impl Into<String>) {
    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: message.into(),
    }));
}

/// ## Summary
/// Renders a failed operation: validation problems as 400 with every
/// message, bad dates as 400, anything else as 500.
pub fn render_app_error(res: &mut Response, err: &AppError) {
    match err {
        AppError::ServiceError(ServiceError::ValidationError(errors)) => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ValidationResponse {
                errors: errors.messages().to_vec(),
            }));
        }
        AppError::CalendarError(err)
        | AppError::ServiceError(ServiceError::CalendarError(err)) => {
            render_error(res, StatusCode::BAD_REQUEST, err.to_string());
        }
        _ => {
            tracing::error!(error = %err, "Request failed");
            render_error(res, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    }
}

/// Renders `value` as JSON with `status`.
pub fn render_json<T: Serialize + Send>(res: &mut Response, status: StatusCode, value: T) {
    res.status_code(status);
    res.render(Json(value));
}

/// ## Summary
/// Fetches the scheduler, rendering a 500 when it is missing.
pub fn scheduler_or_render(depot: &Depot, res: &mut Response) -> Option<Arc<Scheduler>> {
    match get_scheduler_from_depot(depot) {
        Ok(scheduler) => Some(scheduler),
        Err(err) => {
            render_app_error(res, &err);
            None
        }
    }
}

/// ## Summary
/// Parses the JSON body, rendering a 400 when it is malformed.
pub async fn json_body_or_render<T: DeserializeOwned>(
    req: &mut Request,
    res: &mut Response,
) -> Option<T> {
    match req.parse_json::<T>().await {
        Ok(body) => Some(body),
        Err(err) => {
            tracing::debug!(error = ?err, "Failed to parse request body");
            render_error(res, StatusCode::BAD_REQUEST, "Invalid request body");
            None
        }
    }
}

/// Non-blank query parameter.
#[must_use]
pub fn query_param(req: &Request, name: &str) -> Option<String> {
    req.query::<String>(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
