//! `/api/meetings` handlers.

use chrono::NaiveDate;
use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};
use serde::Deserialize;

use medsched_calendar::filter::MeetingFilter;
use medsched_calendar::parse::parse_date;
use medsched_calendar::summary::sort_by_date_time;
use medsched_core::constants::MEETINGS_ROUTE_COMPONENT;
use medsched_core::model::{MeetingForm, MeetingPatch};
use medsched_core::types::{MeetingStatus, StatusFilter};
use medsched_service::Scheduler;

use super::response::{
    SuccessResponse, json_body_or_render, query_param, render_app_error, render_error,
    render_json, scheduler_or_render,
};


const NOT_FOUND: &str = "Meeting not found";
const ID_REQUIRED: &str = "Meeting ID is required";

/// `PUT /api/meetings` body: the id plus any fields to change.
#[derive(Debug, Deserialize)]
struct UpdateMeetingRequest {
    id: Option<String>,
    #[serde(flatten)]
    patch: MeetingPatch,
}

#[derive(Debug, Deserialize)]
struct UpdateStatusRequest {
    status: String,
}

/// ## Summary
/// GET /api/meetings
///
/// - `?id=` returns that meeting or 404.
/// - `?weekStart=` narrows to the ISO week containing the date, `?month=` to
///   its calendar month.
/// - `?query=`, `?status=`, `?hospitalId=` and `?doctor=` filter further.
///
/// Without parameters every meeting is returned. Lists are sorted by start
/// time.
///
/// ## Errors
/// Returns HTTP 400 for an unparseable date or status, or a date whose week or
/// month leaves the representable calendar.
#[handler]
async fn list_meetings(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(scheduler) = scheduler_or_render(depot, res) else {
        return;
    };

    if let Some(id) = query_param(req, "id") {
        match scheduler.get_meeting_by_id(&id).await {
            Some(meeting) => render_json(res, StatusCode::OK, meeting),
            None => render_error(res, StatusCode::NOT_FOUND, NOT_FOUND),
        }
        return;
    }

    let status = match query_param(req, "status").map(|s| s.parse::<StatusFilter>()) {
        None => StatusFilter::All,
        Some(Ok(status)) => status,
        Some(Err(err)) => {
            render_error(res, StatusCode::BAD_REQUEST, err.to_string());
            return;
        }
    };

    let tz = scheduler.tz();
    let listed = if let Some(week_start) = query_param(req, "weekStart") {
        match parse_date(&week_start, tz) {
            Ok(reference) => scheduler.get_meetings_by_week(reference).await,
            Err(err) => {
                render_app_error(res, &err.into());
                return;
            }
        }
    } else if let Some(month) = query_param(req, "month") {
        match parse_date(&month, tz) {
            Ok(reference) => scheduler.get_meetings_by_month(reference).await,
            Err(err) => {
                render_app_error(res, &err.into());
                return;
            }
        }
    } else {
        Ok(scheduler.get_all_meetings().await)
    };
    let mut meetings = match listed {
        Ok(meetings) => meetings,
        Err(err) => {
            render_app_error(res, &err.into());
            return;
        }
    };

    let filter = MeetingFilter {
        query: query_param(req, "query"),
        status,
        hospital_id: query_param(req, "hospitalId"),
        doctor: query_param(req, "doctor"),
    };
    if filter != MeetingFilter::default() {
        meetings = filter.apply(&meetings);
    }
    sort_by_date_time(&mut meetings);

    tracing::debug!(count = meetings.len(), "Listing meetings");
    render_json(res, StatusCode::OK, meetings);
}

/// ## Summary
/// POST /api/meetings - create a meeting (the whole series when a recurrence
/// rule is given) and return it, or the series base.
///
/// ## Errors
/// Returns HTTP 400 with every validation message if the form is invalid.
#[handler]
async fn create_meeting(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(scheduler) = scheduler_or_render(depot, res) else {
        return;
    };
    let Some(form) = json_body_or_render::<MeetingForm>(req, res).await else {
        return;
    };

    match scheduler.create_meeting(form).await {
        Ok(meeting) => render_json(res, StatusCode::CREATED, meeting),
        Err(err) => render_app_error(res, &err.into()),
    }
}

/// ## Summary
/// POST /api/meetings/series - create a meeting with its recurrence series and
/// return every instance.
#[handler]
async fn create_series(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(scheduler) = scheduler_or_render(depot, res) else {
        return;
    };
    let Some(form) = json_body_or_render::<MeetingForm>(req, res).await else {
        return;
    };

    match scheduler.create_meeting_series(form).await {
        Ok(series) => render_json(res, StatusCode::CREATED, series),
        Err(err) => render_app_error(res, &err.into()),
    }
}

/// `?weekStart=` as a date, or today when absent. Renders a 400 when it does
/// not parse.
fn week_reference_or_render(
    req: &Request,
    scheduler: &Scheduler,
    res: &mut Response,
) -> Option<NaiveDate> {
    let Some(week_start) = query_param(req, "weekStart") else {
        return Some(scheduler.today());
    };
    match parse_date(&week_start, scheduler.tz()) {
        Ok(reference) => Some(reference),
        Err(err) => {
            render_app_error(res, &err.into());
            None
        }
    }
}

/// GET /api/meetings/summary - status counts for the week containing
/// `?weekStart=` (default: the current week).
#[handler]
async fn weekly_summary(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(scheduler) = scheduler_or_render(depot, res) else {
        return;
    };
    let Some(reference) = week_reference_or_render(req, &scheduler, res) else {
        return;
    };

    match scheduler.weekly_summary(reference).await {
        Ok(summary) => render_json(res, StatusCode::OK, summary),
        Err(err) => render_app_error(res, &err.into()),
    }
}

/// ## Summary
/// GET /api/meetings/week - the week containing `?weekStart=` (default: the
/// current week) as one sorted column per day, with its status counts and
/// the starts of the previous and next weeks.
#[handler]
async fn week_view(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(scheduler) = scheduler_or_render(depot, res) else {
        return;
    };
    let Some(reference) = week_reference_or_render(req, &scheduler, res) else {
        return;
    };

    match scheduler.week_view(reference).await {
        Ok(view) => render_json(res, StatusCode::OK, view),
        Err(err) => render_app_error(res, &err.into()),
    }
}

/// GET /api/meetings/{id}/series - the base meeting and its generated
/// instances, or 404 when there are none.
#[handler]
async fn get_series(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(scheduler) = scheduler_or_render(depot, res) else {
        return;
    };
    let Some(id) = req.param::<String>("id") else {
        render_error(res, StatusCode::BAD_REQUEST, ID_REQUIRED);
        return;
    };

    let series = scheduler.get_series(&id).await;
    if series.is_empty() {
        render_error(res, StatusCode::NOT_FOUND, NOT_FOUND);
    } else {
        render_json(res, StatusCode::OK, series);
    }
}

/// ## Summary
/// PUT /api/meetings - apply `{id, ...fields}` to a meeting.
///
/// ## Errors
/// Returns HTTP 400 without an id or on invalid fields, 404 for an unknown id.
#[handler]
async fn update_meeting(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(scheduler) = scheduler_or_render(depot, res) else {
        return;
    };
    let Some(body) = json_body_or_render::<UpdateMeetingRequest>(req, res).await else {
        return;
    };
    let Some(id) = body.id.filter(|id| !id.trim().is_empty()) else {
        render_error(res, StatusCode::BAD_REQUEST, ID_REQUIRED);
        return;
    };

    match scheduler.update_meeting(&id, body.patch).await {
        Ok(Some(meeting)) => render_json(res, StatusCode::OK, meeting),
        Ok(None) => render_error(res, StatusCode::NOT_FOUND, NOT_FOUND),
        Err(err) => render_app_error(res, &err.into()),
    }
}

/// PUT /api/meetings/{id}/status - body `{"status": "done"}`.
#[handler]
async fn update_status(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(scheduler) = scheduler_or_render(depot, res) else {
        return;
    };
    let Some(id) = req.param::<String>("id") else {
        render_error(res, StatusCode::BAD_REQUEST, ID_REQUIRED);
        return;
    };
    let Some(body) = json_body_or_render::<UpdateStatusRequest>(req, res).await else {
        return;
    };
    let status = match body.status.parse::<MeetingStatus>() {
        Ok(status) => status,
        Err(err) => {
            render_error(res, StatusCode::BAD_REQUEST, err.to_string());
            return;
        }
    };

    match scheduler.update_meeting_status(&id, status).await {
        Some(meeting) => render_json(res, StatusCode::OK, meeting),
        None => render_error(res, StatusCode::NOT_FOUND, NOT_FOUND),
    }
}

/// DELETE /api/meetings?id= - remove one meeting.
#[handler]
async fn delete_meeting(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(scheduler) = scheduler_or_render(depot, res) else {
        return;
    };
    let Some(id) = query_param(req, "id") else {
        render_error(res, StatusCode::BAD_REQUEST, ID_REQUIRED);
        return;
    };

    if scheduler.delete_meeting(&id).await {
        render_json(res, StatusCode::OK, SuccessResponse { success: true });
    } else {
        render_error(res, StatusCode::NOT_FOUND, NOT_FOUND);
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(MEETINGS_ROUTE_COMPONENT)
        .get(list_meetings)
        .post(create_meeting)
        .put(update_meeting)
        .delete(delete_meeting)
        .push(Router::with_path("series").post(create_series))
        .push(Router::with_path("summary").get(weekly_summary))
        .push(Router::with_path("week").get(week_view))
        .push(Router::with_path("{id}/series").get(get_series))
        .push(Router::with_path("{id}/status").put(update_status))
}
