//! `/api/hospitals` handlers.

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Deserialize;

use medsched_calendar::filter::HospitalFilter;
use medsched_core::constants::HOSPITALS_ROUTE_COMPONENT;
use medsched_core::model::{HospitalForm, HospitalPatch};

use super::response::{
    SuccessResponse, json_body_or_render, query_param, render_app_error, render_error,
    render_json, scheduler_or_render,
};


const NOT_FOUND: &str = "Hospital not found";
const ID_REQUIRED: &str = "Hospital ID is required";

#[derive(Debug, Deserialize)]
struct UpdateHospitalRequest {
    id: Option<String>,
    #[serde(flatten)]
    patch: HospitalPatch,
}

/// ## Summary
/// GET /api/hospitals - `?id=` for one hospital (404 if unknown), otherwise
/// the list narrowed by `?query=` and `?city=`.
#[handler]
async fn list_hospitals(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(scheduler) = scheduler_or_render(depot, res) else {
        return;
    };

    if let Some(id) = query_param(req, "id") {
        match scheduler.get_hospital_by_id(&id).await {
            Some(hospital) => render_json(res, StatusCode::OK, hospital),
            None => render_error(res, StatusCode::NOT_FOUND, NOT_FOUND),
        }
        return;
    }

    let filter = HospitalFilter {
        query: query_param(req, "query"),
        city: query_param(req, "city"),
    };
    let hospitals = scheduler.filter_hospitals(&filter).await;
    render_json(res, StatusCode::OK, hospitals);
}

/// ## Summary
/// POST /api/hospitals - create a hospital.
///
/// ## Errors
/// Returns HTTP 400 with every validation message if the form is invalid.
#[handler]
async fn create_hospital(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(scheduler) = scheduler_or_render(depot, res) else {
        return;
    };
    let Some(form) = json_body_or_render::<HospitalForm>(req, res).await else {
        return;
    };

    match scheduler.create_hospital(form).await {
        Ok(hospital) => render_json(res, StatusCode::CREATED, hospital),
        Err(err) => render_app_error(res, &err.into()),
    }
}

/// PUT /api/hospitals - apply `{id, ...fields}` to a hospital.
#[handler]
async fn update_hospital(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(scheduler) = scheduler_or_render(depot, res) else {
        return;
    };
    let Some(body) = json_body_or_render::<UpdateHospitalRequest>(req, res).await else {
        return;
    };
    let Some(id) = body.id.filter(|id| !id.trim().is_empty()) else {
        render_error(res, StatusCode::BAD_REQUEST, ID_REQUIRED);
        return;
    };

    match scheduler.update_hospital(&id, body.patch).await {
        Ok(Some(hospital)) => render_json(res, StatusCode::OK, hospital),
        Ok(None) => render_error(res, StatusCode::NOT_FOUND, NOT_FOUND),
        Err(err) => render_app_error(res, &err.into()),
    }
}

/// DELETE /api/hospitals?id= - remove a hospital; its meetings are kept.
#[handler]
async fn delete_hospital(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(scheduler) = scheduler_or_render(depot, res) else {
        return;
    };
    let Some(id) = query_param(req, "id") else {
        render_error(res, StatusCode::BAD_REQUEST, ID_REQUIRED);
        return;
    };

    if scheduler.delete_hospital(&id).await {
        render_json(res, StatusCode::OK, SuccessResponse { success: true });
    } else {
        render_error(res, StatusCode::NOT_FOUND, NOT_FOUND);
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(HOSPITALS_ROUTE_COMPONENT)
        .get(list_hospitals)
        .post(create_hospital)
        .put(update_hospital)
        .delete(delete_hospital)
}
